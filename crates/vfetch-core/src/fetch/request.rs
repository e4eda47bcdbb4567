//! Fetch request and outcome types.

use crate::checksum::Checksums;
use crate::downloader::{Credentials, DownloadOptions};
use crate::retry::RetryPolicy;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One fetch: what to get, how to check it, and where to put it.
///
/// Every knob is resolved before the call (see
/// [`FetchConfig::request`](crate::config::FetchConfig::request)); nothing is
/// read from process-wide state during the fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    /// Directory the fetched file is placed into.
    pub destination: PathBuf,
    /// Local filename; inferred from the URL when `None` or empty.
    pub filename: Option<String>,
    pub checksums: Checksums,
    pub retry: RetryPolicy,
    /// Replace an existing file in `destination`.
    pub overwrite: bool,
    pub auth: Option<Credentials>,
    /// Extra request headers in the order given.
    pub headers: Vec<(String, String)>,
    pub verify_tls: bool,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            filename: None,
            checksums: Checksums::default(),
            retry: RetryPolicy::default(),
            overwrite: false,
            auth: None,
            headers: Vec::new(),
            verify_tls: true,
        }
    }

    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }

    pub fn checksums(mut self, checksums: Checksums) -> Self {
        self.checksums = checksums;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn auth(mut self, auth: Credentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Append a request header. Calling this twice with one name sends both.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub(crate) fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            auth: self.auth.clone(),
            headers: self.headers.clone(),
            verify_tls: self.verify_tls,
            overwrite: self.overwrite,
            retry: self.retry,
        }
    }
}

/// Where the returned bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    Cache,
    Network,
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchSource::Cache => f.write_str("cache"),
            FetchSource::Network => f.write_str("network"),
        }
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchOutcome {
    pub url: String,
    /// Verified file as placed by the unpacker.
    pub path: PathBuf,
    pub source: FetchSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builder_fills_download_options() {
        let req = FetchRequest::new("https://example.com/a.zip", "/tmp/out")
            .retry(RetryPolicy::new(3, Duration::from_secs(1)))
            .overwrite(true)
            .auth(Credentials::new("u", "p"))
            .header("X-Token", "abc")
            .verify_tls(false);
        let opts = req.download_options();
        assert_eq!(opts.retry.max_attempts(), 4);
        assert!(opts.overwrite);
        assert!(!opts.verify_tls);
        assert_eq!(opts.auth.as_ref().unwrap().username, "u");
        assert_eq!(opts.headers, vec![("X-Token".to_string(), "abc".to_string())]);
    }

    #[test]
    fn repeated_header_names_are_all_kept_in_order() {
        let req = FetchRequest::new("https://example.com/a.zip", "/tmp/out")
            .header("Accept", "application/gzip")
            .header("Cookie", "a=1")
            .header("Cookie", "b=2");
        let names: Vec<_> = req
            .download_options()
            .headers
            .into_iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect();
        assert_eq!(names, ["Accept: application/gzip", "Cookie: a=1", "Cookie: b=2"]);
    }

    #[test]
    fn outcome_serializes_source_lowercase() {
        let o = FetchOutcome {
            url: "https://example.com/a.zip".to_string(),
            path: PathBuf::from("/tmp/out/a.zip"),
            source: FetchSource::Cache,
        };
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["source"], "cache");
        assert_eq!(json["path"], "/tmp/out/a.zip");
    }
}
