//! Common test utilities for Replay contract tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with a memory store, a scripted
//!   command runner and an event recorder
//! - `RecordingSink`: Event sink keeping every event for later assertions

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use replay::config::Settings;
use replay::domain::ports::{RunEvent, RunEventSink};
use replay::infrastructure::{MemoryStore, ScriptedRunner};
use replay::{Context, Environment, ExecutionResult, ReplayResult, RunReport, Runner, Script};

/// Event sink that records every event; clones share the record
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RunEventSink for RecordingSink {
    fn on_event(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Route `tracing` output through the test harness (`RUST_LOG=replay=debug`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Isolated project for running scripts end to end
pub struct TestEnv {
    pub root: TempDir,
    pub store: MemoryStore,
    pub runner: ScriptedRunner,
    pub events: RecordingSink,
    pub settings: Settings,
}

impl TestEnv {
    /// Project whose environment builder creates `<dir>/bin` like a real one
    pub fn new() -> Self {
        init_tracing();
        let root = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.sandbox.parent_dir = root.path().join("venvs");

        let runner = ScriptedRunner::new();
        runner.on("virtualenv", |command, _| {
            fs::create_dir_all(Path::new(&command.args()[0]).join("bin"))?;
            Ok(ExecutionResult::ok())
        });

        Self {
            root,
            store: MemoryStore::new(),
            runner,
            events: RecordingSink::default(),
            settings,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Create `scripts/<name>` holding `main.py` and return a script for it
    pub fn script(&self, name: &str) -> Script {
        let dir = self.path(&format!("scripts/{name}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("main.py"), "# entry point\n").unwrap();
        Script::new(name, dir).unwrap().with_entry_point("main.py")
    }

    /// Copy the script into `<root>/work` instead of a temporary directory
    pub fn in_place(mut self) -> Self {
        self.settings.workdir.mode = replay::WorkdirMode::InPlace;
        self.settings.workdir.path = Some(self.path("work"));
        self
    }

    pub fn context(&self) -> Context {
        Context::new(self.root.path(), self.settings.clone())
            .with_store(self.store.clone())
            .with_runner(self.runner.clone())
            .with_events(self.events.clone())
    }

    /// Environment a run starts from
    pub fn env(&self) -> Environment {
        Environment::new(self.root.path())
            .with_var("PATH", "/usr/bin")
            .with_var("USER", "ci")
            .with_var("PGDATABASE", "X")
    }

    pub fn run(&self, script: &Script) -> ReplayResult<RunReport> {
        let context = self.context();
        Runner::new(&context, script).run_in(self.env())
    }
}
