//! Tests for cache, checksum, completions, and man.

use super::parse;
use crate::cli::{CacheCommand, Cli, CliCommand};
use clap::{CommandFactory, Parser};
use std::path::Path;
use vfetch_core::checksum::ChecksumKind;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parse_cache_path() {
    match parse(&["vfetch", "cache", "path", "https://x/a"]) {
        CliCommand::Cache {
            command: CacheCommand::Path { url },
        } => assert_eq!(url, "https://x/a"),
        _ => panic!("expected cache path"),
    }
}

#[test]
fn cli_parse_cache_contains_and_remove() {
    assert!(matches!(
        parse(&["vfetch", "cache", "contains", "u"]),
        CliCommand::Cache {
            command: CacheCommand::Contains { .. }
        }
    ));
    assert!(matches!(
        parse(&["vfetch", "cache", "remove", "u"]),
        CliCommand::Cache {
            command: CacheCommand::Remove { .. }
        }
    ));
}

#[test]
fn cli_parse_cache_put_get() {
    match parse(&["vfetch", "cache", "put", "https://x/a", "./a"]) {
        CliCommand::Cache {
            command: CacheCommand::Put { url, file },
        } => {
            assert_eq!(url, "https://x/a");
            assert_eq!(file, Path::new("./a"));
        }
        _ => panic!("expected cache put"),
    }
    match parse(&["vfetch", "cache", "get", "https://x/a", "/tmp/a"]) {
        CliCommand::Cache {
            command: CacheCommand::Get { dest, .. },
        } => assert_eq!(dest, Path::new("/tmp/a")),
        _ => panic!("expected cache get"),
    }
}

#[test]
fn cli_parse_checksum_default_kind() {
    match parse(&["vfetch", "checksum", "/tmp/file.bin"]) {
        CliCommand::Checksum { path, kind } => {
            assert_eq!(path, Path::new("/tmp/file.bin"));
            assert_eq!(kind, ChecksumKind::Sha256);
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_checksum_kind() {
    match parse(&["vfetch", "checksum", "f", "--kind", "md5"]) {
        CliCommand::Checksum { kind, .. } => assert_eq!(kind, ChecksumKind::Md5),
        _ => panic!("expected Checksum"),
    }
    assert!(Cli::try_parse_from(["vfetch", "checksum", "f", "--kind", "crc32"]).is_err());
}

#[test]
fn cli_parse_completions_and_man() {
    assert!(matches!(
        parse(&["vfetch", "completions", "bash"]),
        CliCommand::Completions {
            shell: clap_complete::Shell::Bash
        }
    ));
    assert!(matches!(parse(&["vfetch", "man"]), CliCommand::Man));
}
