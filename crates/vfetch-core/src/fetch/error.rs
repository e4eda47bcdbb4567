//! Fetch orchestrator error type.

use crate::checksum::VerifyError;
use crate::downloader::DownloadError;
use std::io;
use std::path::PathBuf;

/// Terminal failures of [`Fetcher::fetch`](super::Fetcher::fetch).
///
/// Cache read and write failures never appear here: reads fall back to the
/// network and writes are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No filename was given and none can be inferred from the URL.
    #[error("cannot deduce file name from url {url}; pass an explicit filename")]
    AmbiguousFilename { url: String },

    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The fetched file failed final verification.
    #[error("{url}: {source}")]
    Checksum {
        url: String,
        #[source]
        source: VerifyError,
    },

    #[error("failed to unpack {}: {reason:#}", path.display())]
    Unpack { path: PathBuf, reason: anyhow::Error },

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// True for a final checksum mismatch (as opposed to an unreadable file).
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(
            self,
            FetchError::Checksum {
                source: VerifyError::Mismatch { .. },
                ..
            }
        )
    }
}
