//! Application Layer
//!
//! Use cases that orchestrate a run.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Wires capabilities from `plugins` into a `lifecycle` chain
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Runner` - Runs one script: working copy, sandbox, inputs, database, execution

mod context;
mod runner;

pub use context::Context;
pub use runner::Runner;
