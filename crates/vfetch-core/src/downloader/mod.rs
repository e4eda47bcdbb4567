//! Network fetcher: retrying, authenticated HTTP GET into a local file.
//!
//! The orchestrator only depends on the [`Download`] trait; [`CurlDownloader`]
//! is the libcurl-backed implementation used in production.

mod http;

pub use http::CurlDownloader;

use crate::retry::{RetryPolicy, TransferError};
use std::fmt;
use std::path::{Path, PathBuf};

/// HTTP basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Per-request transfer settings.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub auth: Option<Credentials>,
    /// Extra request headers in send order, as `Name: value`. Repeated names are all sent.
    pub headers: Vec<(String, String)>,
    /// When false, TLS peer and host verification are disabled.
    pub verify_tls: bool,
    /// When false, an existing destination file is an error.
    pub overwrite: bool,
    pub retry: RetryPolicy,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            auth: None,
            headers: Vec::new(),
            verify_tls: true,
            overwrite: false,
            retry: RetryPolicy::default(),
        }
    }
}

/// Failure of a download after the retry policy was applied.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The destination already exists and overwriting was not requested.
    #[error("destination {} already exists (overwrite not requested)", path.display())]
    DestinationExists { path: PathBuf },

    /// Every permitted attempt failed, or a failure was not retryable.
    #[error("download of {url} failed after {attempts} attempt(s): {source}")]
    Network {
        url: String,
        attempts: u32,
        #[source]
        source: TransferError,
    },
}

/// Fetches a URL into a local file.
///
/// Implementations must not leave a partially written `destination` behind on
/// failure. Calls block the current thread, including any retry waits.
pub trait Download: Send + Sync {
    fn download(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError>;
}

impl<D: Download + ?Sized> Download for &D {
    fn download(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        (**self).download(url, destination, options)
    }
}
