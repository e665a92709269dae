//! Local Content Store
//!
//! Implements the ContentStore port over a directory on disk.

use std::path::{Path, PathBuf};

use super::normalize_store_path;
use crate::domain::ports::{ContentStore, StoreError, StoreResult};
use crate::infrastructure::fs::copy_path;

/// Content store rooted at a local directory
///
/// Store paths map to files below the root; directories are copied
/// recursively in both directions.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of a store path
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(normalize_store_path(path))
    }
}

impl ContentStore for LocalStore {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn copy_to(&self, path: &str, local: &Path) -> StoreResult<()> {
        let source = self.resolve(path);
        if !source.exists() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        copy_path(&source, local).map_err(|e| StoreError::io(local, e))
    }

    fn copy_from(&self, path: &str, local: &Path) -> StoreResult<()> {
        if !local.exists() {
            return Err(StoreError::LocalNotFound(local.to_path_buf()));
        }
        let destination = self.resolve(path);
        copy_path(local, &destination).map_err(|e| StoreError::io(destination, e))
    }
}
