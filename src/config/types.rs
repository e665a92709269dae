//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReplayResult;

use super::loader::{self, ConfigWarning};

/// Where a run's working copy of the script lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkdirMode {
    /// Fresh temporary directory per run
    #[default]
    Ephemeral,
    /// Directory given by `workdir.path`
    InPlace,
}

/// Working directory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkdirConfig {
    #[serde(default)]
    pub mode: WorkdirMode,

    /// Target for `in_place` mode; must not exist before the run
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Dependency sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Parent directory of cached sandboxes
    #[serde(default = "default_sandbox_parent_dir")]
    pub parent_dir: PathBuf,

    /// Package index passed to the installer as `--index-url`
    #[serde(default)]
    pub index_url: Option<String>,

    /// Command creating an isolated environment; the target dir is appended
    #[serde(default = "default_builder")]
    pub builder: Vec<String>,

    /// Package installer; `install` and the specifier are appended
    #[serde(default = "default_installer")]
    pub installer: Vec<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            parent_dir: default_sandbox_parent_dir(),
            index_url: None,
            builder: default_builder(),
            installer: default_installer(),
        }
    }
}

fn default_sandbox_parent_dir() -> PathBuf {
    PathBuf::from(".virtualenvs")
}

fn default_builder() -> Vec<String> {
    vec!["virtualenv".to_string()]
}

fn default_installer() -> Vec<String> {
    vec!["pip".to_string()]
}

/// Scratch database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Variable telling clients which database to use
    #[serde(default = "default_database_env_var")]
    pub env_var: String,

    /// User name in database names; falls back to `USER` / `USERNAME`
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default = "default_create")]
    pub create: Vec<String>,

    #[serde(default = "default_drop")]
    pub drop: Vec<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            env_var: default_database_env_var(),
            user: None,
            create: default_create(),
            drop: default_drop(),
        }
    }
}

fn default_database_env_var() -> String {
    "PGDATABASE".to_string()
}

fn default_create() -> Vec<String> {
    vec!["createdb".to_string()]
}

fn default_drop() -> Vec<String> {
    vec!["dropdb".to_string()]
}

/// Script execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Interpreter the entry point is handed to
    #[serde(default = "default_interpreter")]
    pub interpreter: Vec<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
        }
    }
}

fn default_interpreter() -> Vec<String> {
    vec!["python".to_string()]
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Root of the directory-backed store; defaults to the base directory
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub workdir: WorkdirConfig,

    #[serde(default)]
    pub sandbox: SandboxConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Settings {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ReplayResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (REPLAY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
