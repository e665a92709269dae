//! Content Store port - where script inputs come from and outputs go to
//!
//! Store paths are plain strings interpreted by the store. Local paths are
//! already resolved against the run's working directory by the caller.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for content store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Content store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Path not present in the store
    #[error("not found in store: {0}")]
    NotFound(String),

    /// Local file missing or unreadable
    #[error("local file not found: {}", .0.display())]
    LocalNotFound(PathBuf),

    /// I/O error while copying
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Abstract content store
///
/// Implementations:
/// - `LocalStore` - directory on disk
/// - `MemoryStore` - in-memory, with copy counters for tests
pub trait ContentStore: Send + Sync {
    /// Check if a store path exists
    fn exists(&self, path: &str) -> bool;

    /// Copy a store path to a local file, creating parent directories
    fn copy_to(&self, path: &str, local: &Path) -> StoreResult<()>;

    /// Copy a local file into the store at `path`
    fn copy_from(&self, path: &str, local: &Path) -> StoreResult<()>;
}
