//! Failure of a single transfer attempt, before the retry decision.

use std::io;

/// What went wrong in one GET. The retry loop classifies this; callers only
/// see it wrapped in [`DownloadError`](crate::downloader::DownloadError).
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    Curl(#[from] curl::Error),

    /// The server answered with a status outside 2xx.
    #[error("HTTP {0}")]
    Http(u32),

    /// The response body could not be written locally. Never retried.
    #[error("writing response body: {0}")]
    Storage(#[source] io::Error),
}
