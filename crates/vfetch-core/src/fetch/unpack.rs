//! Hand-off of a verified file to its consumer.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Consumes a verified staging file (e.g. extracting an archive).
///
/// `file` is deleted by the orchestrator after this returns, whether or not
/// it succeeded, so implementations must not hand out references to it.
pub trait Unpack: Send + Sync {
    /// Process `file` into `destination`, returning the path of the result.
    fn unpack(&self, file: &Path, destination: &Path, overwrite: bool) -> Result<PathBuf>;
}

/// Places the verified file into the destination directory as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceFile;

impl Unpack for PlaceFile {
    fn unpack(&self, file: &Path, destination: &Path, overwrite: bool) -> Result<PathBuf> {
        let name = file
            .file_name()
            .with_context(|| format!("{} has no file name", file.display()))?;
        let target = destination.join(name);
        if !overwrite && target.exists() {
            anyhow::bail!(
                "{} already exists (overwrite not requested)",
                target.display()
            );
        }
        fs::create_dir_all(destination)
            .with_context(|| format!("create {}", destination.display()))?;
        // Staging lives under the destination, so this is normally a rename.
        if let Err(rename_err) = fs::rename(file, &target) {
            tracing::debug!(error = %rename_err, "rename into place failed, copying");
            fs::copy(file, &target).with_context(|| {
                format!("copy {} to {}", file.display(), target.display())
            })?;
        }
        Ok(target)
    }
}
