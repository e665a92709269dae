//! Configuration module for Replay
//!
//! Configuration hierarchy:
//! 1. Environment variables (REPLAY_*) (highest priority)
//! 2. Project config (.replay/config.toml)
//! 3. User config (<config dir>/replay/config.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! Relative paths are resolved against the base directory handed to
//! `Context::new`, not against the working copy of a run.

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG};
pub use types::{
    DatabaseConfig, ExecutionConfig, SandboxConfig, Settings, StoreConfig, WorkdirConfig,
    WorkdirMode,
};
