//! CLI for vfetch: verified, cache-backed downloads.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vfetch_core::checksum::ChecksumKind;
use vfetch_core::config;

use commands::{run_cache, run_checksum, run_completions, run_fetch, run_man, FetchArgs};

/// Top-level CLI for vfetch.
#[derive(Debug, Parser)]
#[command(name = "vfetch")]
#[command(about = "vfetch: fetch files through a checksum-verified download cache", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL into a directory, using the download cache when it verifies.
    Fetch(FetchArgs),

    /// Inspect or modify the download cache directly.
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Print the digest of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
        /// Digest to compute.
        #[arg(long, default_value = "sha256", value_parser = parse_kind)]
        kind: ChecksumKind,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Print the cache file path for a URL.
    Path { url: String },
    /// Report whether a URL is cached.
    Contains { url: String },
    /// Delete the cache entry for a URL.
    Remove { url: String },
    /// Store a local file as the entry for a URL.
    Put { url: String, file: PathBuf },
    /// Copy the entry for a URL to a file (not verified).
    Get { url: String, dest: PathBuf },
}

fn parse_kind(s: &str) -> Result<ChecksumKind, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, args)?;
            }
            CliCommand::Cache { command } => {
                let cfg = config::load_or_init()?;
                run_cache(&cfg, command)?;
            }
            CliCommand::Checksum { path, kind } => run_checksum(&path, kind)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
