//! Script entity - a declared, runnable unit of work
//!
//! A Script is what a descriptor loader produces: where the script's files
//! live, what it reads from and writes to the content store, which packages
//! it needs, and how to start it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ScriptName;
use crate::error::ReplayResult;

/// Option names understood by the built-in capabilities
pub mod options {
    /// Provision a scratch database for the run
    pub const USES_PSQL: &str = "uses psql";
    /// General debug switch
    pub const DEBUG: &str = "debug";
    /// Keep the scratch database after the run (only together with `debug`)
    pub const KEEP_DATABASE: &str = "keep database";
}

/// One `local path <-> store path` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Path relative to the run's working directory
    pub local: PathBuf,
    /// Path inside the content store
    pub store: String,
}

impl FileMapping {
    pub fn new(local: impl Into<PathBuf>, store: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            store: store.into(),
        }
    }
}

/// A declared script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    name: ScriptName,
    dir: PathBuf,
    inputs: Vec<FileMapping>,
    outputs: Vec<FileMapping>,
    dependencies: Vec<String>,
    entry_point: Option<PathBuf>,
    options: BTreeSet<String>,
}

impl Script {
    /// Create a script with a validated name and no declarations
    pub fn new(name: &str, dir: impl Into<PathBuf>) -> ReplayResult<Self> {
        Ok(Self {
            name: ScriptName::parse(name)?,
            dir: dir.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            dependencies: Vec::new(),
            entry_point: None,
            options: BTreeSet::new(),
        })
    }

    pub fn with_input(mut self, local: impl Into<PathBuf>, store: impl Into<String>) -> Self {
        self.inputs.push(FileMapping::new(local, store));
        self
    }

    pub fn with_output(mut self, local: impl Into<PathBuf>, store: impl Into<String>) -> Self {
        self.outputs.push(FileMapping::new(local, store));
        self
    }

    pub fn with_dependency(mut self, specifier: impl Into<String>) -> Self {
        self.dependencies.push(specifier.into());
        self
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<PathBuf>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.insert(option.into());
        self
    }

    pub fn name(&self) -> &ScriptName {
        &self.name
    }

    /// Directory holding the script's source tree
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn inputs(&self) -> &[FileMapping] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[FileMapping] {
        &self.outputs
    }

    /// Dependency specifiers in declaration order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn entry_point(&self) -> Option<&Path> {
        self.entry_point.as_deref()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }
}
