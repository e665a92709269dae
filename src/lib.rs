//! Replay - reproducible script runs
//!
//! Replay runs a declared script in an isolated, reproducible setup: a fresh
//! copy of its source tree, a cached sandbox holding its dependencies, its
//! inputs fetched from a content store, and optionally a scratch database.
//! Everything a run sets up is torn down again in reverse order, and its
//! declared outputs are uploaded back to the store.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod lifecycle;
pub mod plugins;
pub mod sandbox;

// Re-exports for convenience
pub use application::{Context, Runner};
pub use config::{Settings, WorkdirMode};
pub use domain::entities::{options, ExecutionResult, FileMapping, Script};
pub use domain::value_objects::{CacheKey, Environment, EnvironmentOverlay, ScriptName};
pub use error::{ReplayError, ReplayResult};
pub use lifecycle::{Capability, CapabilityChain, CapabilityKind, Run, RunReport};
pub use plugins::Plugin;
