//! Verified, cache-backed fetch for build tooling.
//!
//! [`fetch::Fetcher`] returns a local file guaranteed to match the supplied
//! checksums, reusing an entry from the content-addressed
//! [`cache::DownloadCache`] when one verifies and downloading otherwise.

pub mod config;
pub mod logging;

pub mod cache;
pub mod checksum;
mod cleanup;
pub mod downloader;
pub mod fetch;
pub mod key;
pub mod retry;
pub mod url_model;

pub use cache::{CacheError, DownloadCache};
pub use checksum::{ChecksumKind, Checksums};
pub use downloader::{CurlDownloader, Download, DownloadOptions};
pub use fetch::{FetchError, FetchOutcome, FetchRequest, FetchSource, Fetcher};
pub use key::CacheKey;
