//! Dependency Cache
//!
//! Maps a dependency set to a sandbox directory under a shared parent. The
//! directory name is derived from the set's `CacheKey`, so the same set always
//! lands in the same place and a second run finds it already built.
//!
//! A hit means "the directory exists and no build holds its lock". A build that fails halfway leaves
//! its directory behind; later runs treat it as a hit.

use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::CacheKey;
use crate::error::ReplayResult;

/// Sandbox directory returned by [`DependencyCache::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub dir: PathBuf,
    /// Whether the directory existed before this call
    pub reused: bool,
}

/// Content-addressed store of dependency sandboxes
#[derive(Debug, Clone)]
pub struct DependencyCache {
    parent_dir: PathBuf,
}

impl DependencyCache {
    pub fn new(parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            parent_dir: parent_dir.into(),
        }
    }

    pub fn parent_dir(&self) -> &Path {
        &self.parent_dir
    }

    /// Directory a sandbox with `key` lives in
    pub fn sandbox_dir(&self, key: &CacheKey) -> PathBuf {
        self.parent_dir.join(key.sandbox_dir_name())
    }

    fn lock_path(&self, key: &CacheKey) -> PathBuf {
        self.parent_dir.join(key.lock_file_name())
    }

    /// Whether a sandbox for `key` is already on disk
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.sandbox_dir(key).exists()
    }

    /// Return the sandbox for `key`, running `build` on a miss
    ///
    /// `build` receives the sandbox directory, which does not exist yet. The
    /// build runs under an exclusive lock on a sibling lock file, and the
    /// directory is checked again once the lock is held, so two processes
    /// never build the same key at once. A hit takes the same lock shared,
    /// which waits for a build still in progress.
    pub fn ensure<F>(&self, key: &CacheKey, build: F) -> ReplayResult<CacheEntry>
    where
        F: FnOnce(&Path) -> ReplayResult<()>,
    {
        let dir = self.sandbox_dir(key);
        fs::create_dir_all(&self.parent_dir)?;
        let lock_path = self.lock_path(key);
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        if dir.exists() {
            FileExt::lock_shared(&lock_file)?;
            release_lock(&lock_file, &lock_path);
            debug!(dir = %dir.display(), "sandbox cache hit");
            return Ok(CacheEntry {
                key: key.clone(),
                dir,
                reused: true,
            });
        }

        FileExt::lock_exclusive(&lock_file)?;
        let reused = dir.exists();
        let result = if reused {
            debug!(dir = %dir.display(), "sandbox built by another process");
            Ok(())
        } else {
            debug!(dir = %dir.display(), "sandbox cache miss, building");
            build(&dir)
        };
        release_lock(&lock_file, &lock_path);

        result.map(|()| CacheEntry {
            key: key.clone(),
            dir,
            reused,
        })
    }
}

fn release_lock(file: &fs::File, path: &Path) {
    if let Err(err) = FileExt::unlock(file) {
        warn!(lock = %path.display(), error = %err, "failed to unlock sandbox lock file");
    }
}
