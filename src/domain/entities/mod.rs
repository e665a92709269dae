//! Domain Entities
//!
//! - `Script` - A declared script: inputs, outputs, dependencies, entry point
//! - `ExecutionResult` - Exit status and captured output of one command

mod execution;
mod script;

pub use execution::ExecutionResult;
pub use script::{options, FileMapping, Script};
