//! URL → cache key derivation.
//!
//! A key is the lowercase hex SHA-256 of the URL's UTF-8 bytes. The on-disk
//! location is sharded by the first four hex characters:
//! `<root>/<hex[0:2]>/<hex[2:4]>/<hex>`.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;

/// Length in characters of a hex-encoded SHA-256 digest.
pub const KEY_LEN: usize = 64;

/// Content-address of a cached download, derived from its source URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a URL string.
    pub fn for_url(url: &str) -> Self {
        Self::hash(url.as_bytes())
    }

    /// Key for raw URL bytes of unknown encoding.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD before hashing, so
    /// this never fails. Valid UTF-8 input yields the same key as `for_url`.
    pub fn from_bytes(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        Self::hash(text.as_bytes())
    }

    fn hash(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        CacheKey(hex::encode(digest))
    }

    /// Full hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path components: two 2-char shard directories then the full key.
    pub fn shard(&self) -> [&str; 3] {
        [&self.0[0..2], &self.0[2..4], &self.0]
    }

    /// Path of the entry relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        self.shard().iter().collect()
    }

    /// Path of the shard directory relative to the cache root.
    pub fn relative_dir(&self) -> PathBuf {
        let [a, b, _] = self.shard();
        [a, b].iter().collect()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
