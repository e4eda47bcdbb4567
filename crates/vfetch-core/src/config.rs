use crate::cache::DownloadCache;
use crate::fetch::FetchRequest;
use crate::retry::RetryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry parameters for network fetches (`[retry]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (0 = single attempt).
    pub retries: u32,
    /// Fixed wait between attempts, in seconds.
    pub wait_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 1,
            wait_secs: 5,
        }
    }
}

/// Configuration loaded from `~/.config/vfetch/config.toml`.
///
/// Loaded once by the caller and threaded into each fetch; the library keeps
/// no global defaults of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Download cache root; `None` uses `~/.cache/vfetch/downloads`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Consult and populate the download cache.
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Verify TLS certificates.
    #[serde(default = "default_true")]
    pub verify_tls: bool,
    /// Delete cache entries whose content fails checksum verification.
    #[serde(default)]
    pub purge_corrupt_entries: bool,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_true() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            use_cache: true,
            verify_tls: true,
            purge_corrupt_entries: false,
            retry: RetryConfig::default(),
        }
    }
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry.retries, Duration::from_secs(self.retry.wait_secs))
    }

    /// Cache root: the configured directory, else the XDG cache home.
    pub fn cache_root(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vfetch")?;
        Ok(xdg_dirs.get_cache_home().join("downloads"))
    }

    /// The download cache, or `None` when caching is disabled.
    pub fn download_cache(&self) -> Result<Option<DownloadCache>> {
        if !self.use_cache {
            return Ok(None);
        }
        Ok(Some(DownloadCache::new(self.cache_root()?)))
    }

    /// A request carrying this config's retry and TLS settings.
    pub fn request(&self, url: impl Into<String>, destination: impl Into<PathBuf>) -> FetchRequest {
        FetchRequest::new(url, destination)
            .retry(self.retry_policy())
            .verify_tls(self.verify_tls)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
