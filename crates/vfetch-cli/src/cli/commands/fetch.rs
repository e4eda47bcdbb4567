//! `vfetch fetch <url>` – verified, cache-backed download.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use vfetch_core::checksum::Checksums;
use vfetch_core::config::FetchConfig;
use vfetch_core::downloader::Credentials;
use vfetch_core::{CurlDownloader, FetchRequest, Fetcher};

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// HTTP/HTTPS (or file://) URL to fetch.
    pub url: String,

    /// Directory to place the file in (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Local filename; required when the URL has a query string.
    #[arg(long)]
    pub filename: Option<String>,

    #[arg(long, value_name = "HEX")]
    pub md5: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub sha1: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<String>,

    /// Retries after the first attempt (default from config).
    #[arg(long, value_name = "N")]
    pub retry: Option<u32>,

    /// Seconds to wait between attempts (default from config).
    #[arg(long, value_name = "SECS")]
    pub retry_wait: Option<u64>,

    /// Replace an existing file in the output directory.
    #[arg(long)]
    pub overwrite: bool,

    /// Neither read from nor write to the download cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Skip TLS certificate verification.
    #[arg(long)]
    pub insecure: bool,

    /// Extra request header, e.g. -H 'Accept: application/octet-stream'. Repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Basic-auth user name.
    #[arg(long)]
    pub user: Option<String>,

    /// Basic-auth password (used with --user).
    #[arg(long, requires = "user")]
    pub password: Option<String>,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Config with command-line overrides applied.
fn effective_config(cfg: &FetchConfig, args: &FetchArgs) -> FetchConfig {
    let mut cfg = cfg.clone();
    if let Some(retries) = args.retry {
        cfg.retry.retries = retries;
    }
    if let Some(wait) = args.retry_wait {
        cfg.retry.wait_secs = wait;
    }
    if args.no_cache {
        cfg.use_cache = false;
    }
    if args.insecure {
        cfg.verify_tls = false;
    }
    cfg
}

fn build_request(cfg: &FetchConfig, args: FetchArgs, destination: PathBuf) -> FetchRequest {
    let mut req = cfg
        .request(args.url, destination)
        .overwrite(args.overwrite)
        .checksums(Checksums {
            md5: args.md5,
            sha1: args.sha1,
            sha256: args.sha256,
        });
    if let Some(name) = args.filename {
        req = req.filename(name);
    }
    for (name, value) in args.headers {
        req = req.header(name, value);
    }
    if let Some(user) = args.user {
        req = req.auth(Credentials::new(user, args.password.unwrap_or_default()));
    }
    req
}

pub fn run_fetch(cfg: &FetchConfig, args: FetchArgs) -> Result<()> {
    let cfg = effective_config(cfg, &args);
    let json = args.json;
    let destination = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let request = build_request(&cfg, args, destination);

    let cache = cfg.download_cache()?;
    let downloader = CurlDownloader::new();
    let mut fetcher =
        Fetcher::new(&downloader).purge_corrupt_entries(cfg.purge_corrupt_entries);
    if let Some(cache) = &cache {
        fetcher = fetcher.with_cache(cache);
    }

    let outcome = fetcher.fetch(&request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{} ({})", outcome.path.display(), outcome.source);
    }
    Ok(())
}
