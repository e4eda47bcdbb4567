//! Checksum computation and verification (md5, sha1, sha256).
//!
//! Digests are computed on demand by streaming the file in fixed-size chunks,
//! so memory use stays bounded regardless of file size.

use anyhow::{Context, Result};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// Hash algorithm a checksum is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
    Md5,
    Sha1,
    Sha256,
}

impl ChecksumKind {
    pub const ALL: [ChecksumKind; 3] = [ChecksumKind::Md5, ChecksumKind::Sha1, ChecksumKind::Sha256];

    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumKind::Md5 => "md5",
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(ChecksumKind::Md5),
            "sha1" => Ok(ChecksumKind::Sha1),
            "sha256" => Ok(ChecksumKind::Sha256),
            other => anyhow::bail!("unknown checksum kind: {}", other),
        }
    }
}

/// Expected digests for a file. `None` means that kind is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Checksums {
    pub fn sha256(hex: impl Into<String>) -> Self {
        Self {
            sha256: Some(hex.into()),
            ..Self::default()
        }
    }

    pub fn get(&self, kind: ChecksumKind) -> Option<&str> {
        let v = match kind {
            ChecksumKind::Md5 => &self.md5,
            ChecksumKind::Sha1 => &self.sha1,
            ChecksumKind::Sha256 => &self.sha256,
        };
        v.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Supplied (kind, expected) pairs in md5, sha1, sha256 order.
    pub fn iter(&self) -> impl Iterator<Item = (ChecksumKind, &str)> + '_ {
        ChecksumKind::ALL
            .into_iter()
            .filter_map(move |k| self.get(k).map(|v| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Failure to verify a file against its expected checksums.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("{kind} checksum mismatch: expected {expected}, got {actual}")]
    Mismatch {
        kind: ChecksumKind,
        expected: String,
        actual: String,
    },

    #[error("failed to compute checksum of {path}: {reason:#}")]
    Read { path: String, reason: anyhow::Error },
}

/// Checks `path` against every supplied checksum; an empty set always passes.
/// Comparison is case-insensitive and ignores surrounding whitespace.
pub fn verify(path: &Path, expected: &Checksums) -> std::result::Result<(), VerifyError> {
    for (kind, want) in expected.iter() {
        let actual = digest_path(kind, path).map_err(|reason| VerifyError::Read {
            path: path.display().to_string(),
            reason,
        })?;
        let want = want.trim();
        if !actual.eq_ignore_ascii_case(want) {
            return Err(VerifyError::Mismatch {
                kind,
                expected: want.to_string(),
                actual,
            });
        }
        tracing::debug!(path = %path.display(), %kind, "checksum ok");
    }
    Ok(())
}

/// Compute the digest of `path` for the given kind as lowercase hex.
pub fn digest_path(kind: ChecksumKind, path: &Path) -> Result<String> {
    match kind {
        ChecksumKind::Md5 => md5_path(path),
        ChecksumKind::Sha1 => sha1_path(path),
        ChecksumKind::Sha256 => sha256_path(path),
    }
}

pub fn md5_path(path: &Path) -> Result<String> {
    hash_path::<Md5>(path)
}

pub fn sha1_path(path: &Path) -> Result<String> {
    hash_path::<Sha1>(path)
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large files.
pub fn sha256_path(path: &Path) -> Result<String> {
    hash_path::<Sha256>(path)
}

fn hash_path<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}
