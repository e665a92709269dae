//! Cache Key Value Object
//!
//! Content address of a dependency set. Two scripts that declare the same
//! dependencies, in any order and with any repetition, share one key and
//! therefore one sandbox directory.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of the sorted, deduplicated dependency specifiers joined by `\n`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Prefix of the sandbox directory named after a key
    pub const SANDBOX_PREFIX: &'static str = "sandbox_";

    /// Compute the key of a dependency set
    pub fn from_specifiers<S: AsRef<str>>(specifiers: &[S]) -> Self {
        let mut sorted: Vec<&str> = specifiers.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let hash = Sha256::digest(sorted.join("\n").as_bytes());
        Self(format!("{:x}", hash))
    }

    /// Hex digest
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Directory name of the sandbox cached under this key
    pub fn sandbox_dir_name(&self) -> String {
        format!("{}{}", Self::SANDBOX_PREFIX, self.0)
    }

    /// Name of the lock file guarding the sandbox build
    pub fn lock_file_name(&self) -> String {
        format!("{}.lock", self.sandbox_dir_name())
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
