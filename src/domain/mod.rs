//! Domain Layer
//!
//! The vocabulary of a run, free of process and file-system side effects.
//!
//! ## Structure
//!
//! - `entities/` - Script descriptors and command results
//! - `value_objects/` - Immutable values (ScriptName, CacheKey, Environment)
//! - `ports/` - Interfaces for the content store, command runner and events
//!
//! ## Design Principles
//!
//! 1. **No ambient state** - The working directory and environment variables
//!    of a run live in an explicit `Environment`, never in process globals
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
