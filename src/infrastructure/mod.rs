//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Directory tree copying shared by stores and capabilities
//! - `store/` - Content stores (Local, Memory)
//! - `process/` - Command runners (System, Scripted)
//! - `events/` - Run event sinks (Json)

pub mod events;
pub mod fs;
pub mod process;
pub mod store;

// Re-export for convenience
pub use events::JsonEventSink;
pub use process::{ScriptedRunner, SystemRunner};
pub use store::{LocalStore, MemoryStore};
