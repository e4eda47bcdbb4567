//! `vfetch checksum <path>` – print a file digest.

use anyhow::Result;
use std::path::Path;
use vfetch_core::checksum::{self, ChecksumKind};

/// Compute and print the digest of the given file, `sha256sum`-style.
pub fn run_checksum(path: &Path, kind: ChecksumKind) -> Result<()> {
    let digest = checksum::digest_path(kind, path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
