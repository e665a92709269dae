//! Command Runner Implementations
//!
//! `SystemRunner` spawns real processes. `ScriptedRunner` is the test double
//! that records invocations and answers with configured results.

mod scripted;
mod system;

pub use scripted::{Invocation, ScriptedRunner};
pub use system::SystemRunner;
