//! Run environment value objects
//!
//! A run never touches the process-wide working directory or environment.
//! Instead every capability mutates an explicit `Environment`, and every
//! external command is spawned with exactly that environment. Mutations are
//! made reversible with `EnvironmentOverlay`.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the command search path variable
pub const PATH_VAR: &str = "PATH";

/// Environment variables plus current directory of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    current_dir: PathBuf,
}

impl Environment {
    /// Empty environment rooted at `current_dir`
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: BTreeMap::new(),
            current_dir: current_dir.into(),
        }
    }

    /// Snapshot of the calling process' environment and working directory
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> io::Result<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Ok(Self {
            vars,
            current_dir: std::env::current_dir()?,
        })
    }

    /// Builder-style variable setter
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// All variables, sorted by name
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Switch the current directory
    ///
    /// Relative paths are taken from the current directory. Fails with
    /// `NotFound` when the target is not an existing directory.
    pub fn change_dir(&mut self, dir: &Path) -> io::Result<()> {
        let target = self.resolve(dir);
        if !target.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", target.display()),
            ));
        }
        self.current_dir = target;
        Ok(())
    }

    /// Resolve `path` against the current directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        }
    }

    /// Put `dir` in front of the command search path
    pub fn prepend_path(&mut self, dir: &Path) -> io::Result<()> {
        let mut entries: Vec<PathBuf> = vec![dir.to_path_buf()];
        if let Some(existing) = self.get(PATH_VAR) {
            entries.extend(std::env::split_paths(existing));
        }
        let joined: OsString = std::env::join_paths(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let joined = joined
            .into_string()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "PATH is not valid Unicode"))?;
        self.set(PATH_VAR, joined);
        Ok(())
    }

    /// Record the current state of `key` so it can be restored later
    pub fn overlay(&self, key: &str) -> EnvironmentOverlay {
        EnvironmentOverlay::capture(self, key)
    }
}

/// Saved prior state of one environment variable
///
/// Restoring consumes the overlay, so a saved value is put back at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an overlay must be restored to undo the mutation"]
pub struct EnvironmentOverlay {
    key: String,
    prior: Option<String>,
}

impl EnvironmentOverlay {
    pub fn capture(env: &Environment, key: &str) -> Self {
        Self {
            key: key.to_string(),
            prior: env.get(key).map(str::to_string),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the variable was set when captured
    pub fn had_value(&self) -> bool {
        self.prior.is_some()
    }

    pub fn prior_value(&self) -> Option<&str> {
        self.prior.as_deref()
    }

    /// Put the variable back: the prior value, or removed if it was absent
    pub fn restore(self, env: &mut Environment) {
        match self.prior {
            Some(value) => env.set(self.key, value),
            None => {
                env.remove(&self.key);
            }
        }
    }
}
