//! Download cache error type.

use std::io;
use std::path::{Path, PathBuf};

/// Errors from download cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// `get` was called for a URL with no entry.
    #[error("download cache has no entry for {url}")]
    NotFound { url: String },

    /// Filesystem failure (shard directory creation, copy, or atomic replace).
    #[error("download cache: {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        CacheError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }
}
