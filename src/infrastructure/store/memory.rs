//! In-memory Content Store
//!
//! Keeps file contents in a shared map and counts transfers, which makes it
//! usable as a spy in tests. Clones share the same contents.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::normalize_store_path;
use crate::domain::ports::{ContentStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<String, Vec<u8>>,
    downloads: Vec<String>,
    uploads: Vec<String>,
}

/// In-memory content store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the map half-written
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Put content into the store
    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.lock()
            .files
            .insert(normalize_store_path(path).to_string(), content.into());
    }

    /// Content stored at `path`
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(normalize_store_path(path)).cloned()
    }

    /// Store paths copied out, in order
    pub fn downloads(&self) -> Vec<String> {
        self.lock().downloads.clone()
    }

    /// Store paths copied in, in order
    pub fn uploads(&self) -> Vec<String> {
        self.lock().uploads.clone()
    }

    /// Total number of copy calls in either direction
    pub fn copy_count(&self) -> usize {
        let inner = self.lock();
        inner.downloads.len() + inner.uploads.len()
    }
}

impl ContentStore for MemoryStore {
    fn exists(&self, path: &str) -> bool {
        self.lock().files.contains_key(normalize_store_path(path))
    }

    fn copy_to(&self, path: &str, local: &Path) -> StoreResult<()> {
        let key = normalize_store_path(path).to_string();
        let content = {
            let mut inner = self.lock();
            inner.downloads.push(key.clone());
            inner
                .files
                .get(&key)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(path.to_string()))?
        };
        if let Some(parent) = local.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        std::fs::write(local, content).map_err(|e| StoreError::io(local, e))
    }

    fn copy_from(&self, path: &str, local: &Path) -> StoreResult<()> {
        let key = normalize_store_path(path).to_string();
        self.lock().uploads.push(key.clone());
        let content = std::fs::read(local).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::LocalNotFound(local.to_path_buf()),
            _ => StoreError::io(local, e),
        })?;
        self.lock().files.insert(key, content);
        Ok(())
    }
}
