//! Run context
//!
//! Long-lived collaborators and settings shared read-only by every run: the
//! content store, the command runner, the event sink, and where cached
//! sandboxes live.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::domain::ports::{CommandRunner, ContentStore, NoopEventSink, RunEventSink};
use crate::infrastructure::{LocalStore, SystemRunner};

pub struct Context {
    base_dir: PathBuf,
    settings: Settings,
    store: Box<dyn ContentStore>,
    runner: Box<dyn CommandRunner>,
    events: Box<dyn RunEventSink>,
}

impl Context {
    /// Context with a directory-backed store and real processes
    ///
    /// `base_dir` anchors the relative paths in `settings`; the store root
    /// defaults to it.
    pub fn new(base_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        let base_dir = base_dir.into();
        let store_root = match &settings.store.root {
            Some(root) => base_dir.join(root),
            None => base_dir.clone(),
        };
        Self {
            base_dir,
            settings,
            store: Box::new(LocalStore::new(store_root)),
            runner: Box::new(SystemRunner::new()),
            events: Box::new(NoopEventSink),
        }
    }

    pub fn with_store(mut self, store: impl ContentStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_events(mut self, events: impl RunEventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn events(&self) -> &dyn RunEventSink {
        self.events.as_ref()
    }

    /// Resolve a configured path against the base directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Parent directory of cached dependency sandboxes
    pub fn sandbox_parent_dir(&self) -> PathBuf {
        self.resolve(&self.settings.sandbox.parent_dir)
    }

    pub fn index_url(&self) -> Option<&str> {
        self.settings.sandbox.index_url.as_deref()
    }
}
