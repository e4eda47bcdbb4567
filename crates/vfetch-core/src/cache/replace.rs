//! Atomic "rename over" primitive used to publish cache entries.
//!
//! Unix: `rename(2)` replaces an existing destination atomically; a concurrent
//! reader opens either the old inode or the new one.
//!
//! Other targets: rename may refuse to overwrite, so the destination is
//! unlinked and the rename retried. A crash between the two steps leaves the
//! entry absent, never partially written.

use std::fs;
use std::io;
use std::path::Path;

/// Move `tmp` over `dest` in one step. Both paths must be on the same filesystem.
#[cfg(unix)]
pub(crate) fn replace_file(tmp: &Path, dest: &Path) -> io::Result<()> {
    fs::rename(tmp, dest)?;
    sync_parent_best_effort(dest);
    Ok(())
}

/// Move `tmp` over `dest`, unlinking an existing destination if rename refuses.
#[cfg(not(unix))]
pub(crate) fn replace_file(tmp: &Path, dest: &Path) -> io::Result<()> {
    // Concurrent writers can re-create `dest` between unlink and rename.
    const MAX_ATTEMPTS: usize = 64;

    let mut attempts = 0usize;
    loop {
        match fs::rename(tmp, dest) {
            Ok(()) => return Ok(()),
            Err(err)
                if attempts < MAX_ATTEMPTS
                    && err.kind() != io::ErrorKind::NotFound
                    && dest.exists() =>
            {
                match fs::remove_file(dest) {
                    Ok(()) => {}
                    Err(remove_err) if remove_err.kind() == io::ErrorKind::NotFound => {}
                    Err(remove_err) => return Err(remove_err),
                }
                attempts += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// fsync the directory holding `path` so the rename itself is durable.
#[cfg(unix)]
fn sync_parent_best_effort(path: &Path) {
    let Some(parent) = path.parent() else {
        return;
    };
    if let Err(err) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        tracing::debug!(dir = %parent.display(), error = %err, "directory sync failed");
    }
}
