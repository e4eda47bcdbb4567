//! Best-effort removal of temporary files and directories.
//!
//! These helpers never return an error: a failed cleanup is logged at debug
//! level and reported as `false`, leaving the caller's primary result intact.

use std::fs;
use std::io;
use std::path::Path;

/// Remove a file, treating "already gone" as success.
pub(crate) fn remove_file_best_effort(path: &Path, reason: &'static str) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(err) if err.kind() == io::ErrorKind::NotFound => true,
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                reason,
                error = %err,
                "failed to remove file"
            );
            false
        }
    }
}

/// Remove a directory tree, treating "already gone" as success.
pub(crate) fn remove_dir_best_effort(path: &Path, reason: &'static str) -> bool {
    match fs::remove_dir_all(path) {
        Ok(()) => true,
        Err(err) if err.kind() == io::ErrorKind::NotFound => true,
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                reason,
                error = %err,
                "failed to remove directory"
            );
            false
        }
    }
}
