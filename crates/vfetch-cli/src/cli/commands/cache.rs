//! `vfetch cache ...` – direct access to the download cache.

use crate::cli::CacheCommand;
use anyhow::{Context, Result};
use vfetch_core::config::FetchConfig;
use vfetch_core::DownloadCache;

pub fn run_cache(cfg: &FetchConfig, command: CacheCommand) -> Result<()> {
    let cache = DownloadCache::new(cfg.cache_root()?);
    match command {
        CacheCommand::Path { url } => println!("{}", cache.path_of(&url).display()),
        CacheCommand::Contains { url } => {
            if cache.contains(&url) {
                println!("cached: {}", url);
            } else {
                println!("not cached: {}", url);
            }
        }
        CacheCommand::Remove { url } => {
            cache.remove(&url)?;
            println!("Removed {url}");
        }
        CacheCommand::Put { url, file } => {
            cache
                .put(&url, &file)
                .with_context(|| format!("caching {} for {}", file.display(), url))?;
            println!("Cached {} as {}", file.display(), url);
        }
        CacheCommand::Get { url, dest } => {
            cache.get(&url, &dest)?;
            println!("{}", dest.display());
        }
    }
    Ok(())
}
