//! Fetch orchestrator: cache lookup, verification, network fallback, and
//! best-effort cache population.
//!
//! Flow for one [`FetchRequest`]:
//!
//! 1. Resolve the local filename; ambiguous URLs fail before any I/O, and so
//!    does an existing target file unless overwriting was requested.
//! 2. With a cache configured and an entry present, copy it into a private
//!    staging directory and verify it. A mismatch discards the copy and falls
//!    through to the network; the cache is an optimization, never the source
//!    of truth.
//! 3. Otherwise download into the staging directory.
//! 4. Verify again, unconditionally. A failure here is terminal.
//! 5. If the bytes came from the network, `put` them into the cache; failure
//!    only logs a warning.
//! 6. Hand the file to the unpacker, then delete the staging copy whether or
//!    not unpacking succeeded.

mod error;
mod request;
mod unpack;

pub use error::FetchError;
pub use request::{FetchOutcome, FetchRequest, FetchSource};
pub use unpack::{PlaceFile, Unpack};

use crate::cache::DownloadCache;
use crate::checksum;
use crate::cleanup::{remove_dir_best_effort, remove_file_best_effort};
use crate::downloader::{Download, DownloadError};
use crate::url_model;
use std::fs;
use std::path::Path;

/// Prefix of per-fetch staging directories created inside the destination.
pub const STAGING_PREFIX: &str = ".vfetch-";

/// Composes a downloader, an optional cache, and an unpacker.
///
/// Holds no mutable state; one `Fetcher` can serve concurrent fetches.
pub struct Fetcher<'a> {
    downloader: &'a dyn Download,
    cache: Option<&'a DownloadCache>,
    unpacker: &'a dyn Unpack,
    purge_corrupt_entries: bool,
}

impl<'a> Fetcher<'a> {
    pub fn new(downloader: &'a dyn Download) -> Self {
        Self {
            downloader,
            cache: None,
            unpacker: &PlaceFile,
            purge_corrupt_entries: false,
        }
    }

    pub fn with_cache(mut self, cache: &'a DownloadCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_unpacker(mut self, unpacker: &'a dyn Unpack) -> Self {
        self.unpacker = unpacker;
        self
    }

    /// Also delete a cache entry whose content fails verification.
    ///
    /// Off by default: the bad entry stays and every later fetch of the URL
    /// repeats the failed check and the network fallback.
    pub fn purge_corrupt_entries(mut self, purge: bool) -> Self {
        self.purge_corrupt_entries = purge;
        self
    }

    /// Obtain `request.url` as a verified file in `request.destination`.
    pub fn fetch(&self, request: &FetchRequest) -> Result<FetchOutcome, FetchError> {
        let filename = url_model::resolve_filename(&request.url, request.filename.as_deref())
            .ok_or_else(|| FetchError::AmbiguousFilename {
                url: request.url.clone(),
            })?;

        let target = request.destination.join(&filename);
        if !request.overwrite && target.exists() {
            return Err(DownloadError::DestinationExists { path: target }.into());
        }

        fs::create_dir_all(&request.destination).map_err(|source| FetchError::Io {
            op: "create destination",
            path: request.destination.clone(),
            source,
        })?;
        // Same filesystem as the destination so placing the file is a rename.
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&request.destination)
            .map_err(|source| FetchError::Io {
                op: "create staging dir in",
                path: request.destination.clone(),
                source,
            })?;
        let staged = staging.path().join(&filename);

        let result = self.fetch_staged(request, &staged);

        // Dropping `staging` afterwards finds the tree already gone.
        remove_dir_best_effort(staging.path(), "fetch.cleanup_staging_dir");
        result
    }

    fn fetch_staged(
        &self,
        request: &FetchRequest,
        staged: &Path,
    ) -> Result<FetchOutcome, FetchError> {
        let url = request.url.as_str();

        let from_cache = match self.cache {
            Some(cache) => self.load_from_cache(cache, request, staged),
            None => false,
        };

        let source = if from_cache {
            FetchSource::Cache
        } else {
            self.downloader
                .download(url, staged, &request.download_options())?;
            FetchSource::Network
        };

        checksum::verify(staged, &request.checksums).map_err(|source| FetchError::Checksum {
            url: url.to_string(),
            source,
        })?;

        if source == FetchSource::Network {
            if let Some(cache) = self.cache {
                if let Err(err) = cache.put(url, staged) {
                    tracing::warn!(url, error = %err, "could not add to download cache");
                }
            }
        }

        let path = self
            .unpacker
            .unpack(staged, &request.destination, request.overwrite)
            .map_err(|reason| FetchError::Unpack {
                path: staged.to_path_buf(),
                reason,
            })?;

        Ok(FetchOutcome {
            url: url.to_string(),
            path,
            source,
        })
    }

    /// Copy a cached entry to `staged` and pre-verify it. Returns true only if
    /// `staged` now holds content matching the request's checksums; on any
    /// failure `staged` is removed and the caller falls back to the network.
    fn load_from_cache(
        &self,
        cache: &DownloadCache,
        request: &FetchRequest,
        staged: &Path,
    ) -> bool {
        let url = request.url.as_str();
        if !cache.contains(url) {
            tracing::debug!(url, "download cache miss");
            return false;
        }

        if let Err(err) = cache.get(url, staged) {
            if err.is_not_found() {
                // Removed between contains() and get().
                tracing::debug!(url, "download cache entry vanished");
            } else {
                tracing::warn!(url, error = %err, "could not read from download cache");
            }
            remove_file_best_effort(staged, "fetch.cache_read_failed");
            return false;
        }

        match checksum::verify(staged, &request.checksums) {
            Ok(()) => {
                tracing::info!(url, "using cached version");
                true
            }
            Err(err) => {
                tracing::warn!(
                    url,
                    error = %err,
                    "download cache contains entry with wrong checksum, attempting download again"
                );
                remove_file_best_effort(staged, "fetch.cache_checksum_mismatch");
                if self.purge_corrupt_entries {
                    if let Err(err) = cache.remove(url) {
                        tracing::warn!(url, error = %err, "could not purge corrupt cache entry");
                    }
                }
                false
            }
        }
    }
}
