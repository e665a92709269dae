//! Error types for Replay
//!
//! Uses `thiserror` for library errors. Every failure a run can produce is a
//! distinct variant so callers can tell them apart.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ExecutionResult;
use crate::lifecycle::CapabilityKind;

/// Result type alias for Replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Main error type for Replay operations
#[derive(Error, Debug)]
pub enum ReplayError {
    /// A declared input is absent from the content store
    #[error("missing input: '{path}' does not exist in the content store")]
    MissingInput { path: String },

    /// A declared output was not produced by the script
    #[error("missing output: '{}' was not produced by the script", path.display())]
    MissingOutput { path: PathBuf },

    /// The package installer rejected a dependency specifier
    #[error("failed to install dependency '{specifier}': {result}")]
    DependencyInstall {
        specifier: String,
        result: ExecutionResult,
    },

    /// The script's entry point exited with a non-zero status
    #[error("script failed: {result}")]
    ScriptFailure { result: ExecutionResult },

    /// Script name violates the naming rule
    #[error(
        "invalid script name '{name}': use letters, digits and underscores, starting with a letter"
    )]
    InvalidScriptName { name: String },

    /// Any other failure while acquiring a capability
    #[error("{capability} failed to acquire: {source:#}")]
    Acquire {
        capability: CapabilityKind,
        #[source]
        source: anyhow::Error,
    },

    /// Any other failure while releasing a capability
    #[error("{capability} failed to release: {source:#}")]
    Release {
        capability: CapabilityKind,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    /// Wrap a collaborator error as an acquire failure of `capability`
    pub fn acquire(capability: CapabilityKind, source: impl Into<anyhow::Error>) -> Self {
        Self::Acquire {
            capability,
            source: source.into(),
        }
    }

    /// Wrap a collaborator error as a release failure of `capability`
    pub fn release(capability: CapabilityKind, source: impl Into<anyhow::Error>) -> Self {
        Self::Release {
            capability,
            source: source.into(),
        }
    }
}
