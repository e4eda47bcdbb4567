//! Content-addressed download cache.
//!
//! Entries live at `<root>/<xx>/<yy>/<sha256(url)>` (see [`CacheKey`]) and carry
//! no metadata: presence means "cached", and callers re-verify content.
//!
//! There is no locking. `put` stages bytes in a uniquely named temp file in the
//! entry's own shard directory and publishes it with a single atomic rename, so
//! readers (in this or any other process) see either the previous complete
//! entry or the new complete entry. Concurrent writers to one key race and the
//! last rename wins.

mod error;
mod replace;

pub use error::CacheError;

use crate::cleanup::remove_file_best_effort;
use crate::key::CacheKey;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Prefix of in-flight temp files inside shard directories.
pub const TEMP_PREFIX: &str = ".tmp";

/// File store keyed by source URL.
#[derive(Debug, Clone)]
pub struct DownloadCache {
    root: PathBuf,
}

impl DownloadCache {
    /// Cache rooted at `root`. No I/O happens here; directories are created by `put`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location the entry for `url` occupies (whether or not it exists).
    pub fn path_of(&self, url: &str) -> PathBuf {
        self.root.join(CacheKey::for_url(url).relative_path())
    }

    /// True iff an entry for `url` is present.
    pub fn contains(&self, url: &str) -> bool {
        self.path_of(url).is_file()
    }

    /// Copy the cached bytes for `url` to `destination`. Content is not verified.
    pub fn get(&self, url: &str, destination: &Path) -> Result<(), CacheError> {
        let src = self.path_of(url);
        // Opening first pins the inode; a concurrent `put` renaming over `src`
        // cannot change what this copy reads.
        let mut entry = match File::open(&src) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::NotFound {
                    url: url.to_string(),
                })
            }
            Err(e) => return Err(CacheError::io("open entry", &src, e)),
        };
        let mut out =
            File::create(destination).map_err(|e| CacheError::io("create", destination, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| CacheError::io("copy to", destination, e))?;
        out.flush()
            .map_err(|e| CacheError::io("flush", destination, e))?;
        tracing::debug!(url, dest = %destination.display(), "copied from download cache");
        Ok(())
    }

    /// Install the bytes of `source` as the entry for `url`, replacing any previous entry.
    pub fn put(&self, url: &str, source: &Path) -> Result<(), CacheError> {
        let key = CacheKey::for_url(url);
        let dir = self.root.join(key.relative_dir());
        let dest = self.root.join(key.relative_path());

        fs::create_dir_all(&dir).map_err(|e| CacheError::io("create shard dir", &dir, e))?;

        // Same directory as `dest`: rename is only atomic within one filesystem.
        let (file, tmp_path) = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&dir)
            .and_then(|t| t.keep().map_err(|e| e.error))
            .map_err(|e| CacheError::io("create temp file in", &dir, e))?;

        let result = copy_and_sync(source, file)
            .map_err(|e| CacheError::io("copy from", source, e))
            .and_then(|()| {
                replace::replace_file(&tmp_path, &dest)
                    .map_err(|e| CacheError::io("replace", &dest, e))
            });

        if result.is_err() {
            remove_file_best_effort(&tmp_path, "cache.put.cleanup_temp");
        } else {
            tracing::debug!(url, key = %key, "stored in download cache");
        }
        result
    }

    /// Delete the entry for `url`. A missing entry is not an error.
    pub fn remove(&self, url: &str) -> Result<(), CacheError> {
        let path = self.path_of(url);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io("remove", &path, e)),
        }
    }
}

/// Copy `source` into `out` and flush it to disk; `out` is closed on return.
fn copy_and_sync(source: &Path, mut out: File) -> io::Result<()> {
    let mut src = File::open(source)?;
    io::copy(&mut src, &mut out)?;
    out.sync_all()
}
