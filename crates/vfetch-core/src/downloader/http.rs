//! Single-stream HTTP GET via libcurl's easy interface.
//!
//! Writes the response body sequentially to the destination file. Each attempt
//! truncates the file; a failed attempt removes it.

use super::{Download, DownloadError, DownloadOptions};
use crate::cleanup::remove_file_best_effort;
use crate::retry::{run_with_retry, TransferError};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Blocking libcurl downloader.
#[derive(Debug, Clone)]
pub struct CurlDownloader {
    pub connect_timeout: Duration,
    /// Abort when throughput stays below 1 KiB/s for this long.
    pub low_speed_time: Duration,
    /// Upper bound on one attempt, including the body transfer.
    pub timeout: Duration,
}

impl Default for CurlDownloader {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_time: Duration::from_secs(60),
            timeout: Duration::from_secs(3600),
        }
    }
}

impl CurlDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// One GET of `url` into `destination`. Returns the number of body bytes written.
    fn attempt(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<u64, TransferError> {
        let mut file = File::create(destination).map_err(TransferError::Storage)?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(self.low_speed_time)?;
        easy.timeout(self.timeout)?;
        if !options.verify_tls {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }
        if let Some(auth) = &options.auth {
            easy.username(&auth.username)?;
            easy.password(&auth.password)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &options.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !options.headers.is_empty() {
            easy.http_headers(list)?;
        }

        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(TransferError::Storage(e));
        }
        performed?;

        // 0 means no HTTP status (e.g. file:// URLs); curl already reported transport errors.
        let code = easy.response_code()?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(TransferError::Http(code));
        }

        file.sync_all().map_err(TransferError::Storage)?;
        Ok(written)
    }
}

impl Download for CurlDownloader {
    fn download(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        if !options.overwrite && destination.exists() {
            return Err(DownloadError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }

        let result = run_with_retry(&options.retry, |attempt| {
            tracing::debug!(url, attempt, dest = %destination.display(), "GET");
            let r = self.attempt(url, destination, options);
            if r.is_err() {
                remove_file_best_effort(destination, "download.failed_attempt");
            }
            r
        });

        match result {
            Ok(bytes) => {
                tracing::info!(url, bytes, dest = %destination.display(), "download complete");
                Ok(())
            }
            Err((source, attempts)) => Err(DownloadError::Network {
                url: url.to_string(),
                attempts,
                source,
            }),
        }
    }
}
