//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod content_store;
pub mod run_events;

pub use command_runner::{CommandRunner, CommandSpec};
pub use content_store::{ContentStore, StoreError, StoreResult};
pub use run_events::{NoopEventSink, RunEvent, RunEventSink};
