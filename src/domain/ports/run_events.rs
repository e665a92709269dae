//! Run Event Port
//!
//! Provides an observable interface for a script run.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::CapabilityKind;

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Run started
    Started { script: String },

    /// A capability finished acquiring
    Acquired { capability: CapabilityKind },

    /// A capability failed to acquire; already-acquired ones are rolled back
    AcquireFailed {
        capability: CapabilityKind,
        error: String,
    },

    /// A capability was released
    Released { capability: CapabilityKind },

    /// A capability failed to release; teardown continues
    ReleaseFailed {
        capability: CapabilityKind,
        error: String,
    },

    /// A cached dependency sandbox was reused
    SandboxReused { path: PathBuf },

    /// A dependency sandbox was built
    SandboxBuilt { path: PathBuf },

    /// An external command exited
    CommandFinished { command: String, status: i32 },

    /// Run completed
    Finished { success: bool },
}

/// Trait for receiving run events
///
/// Implementations can be:
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait RunEventSink: Send + Sync {
    /// Handle a run event
    fn on_event(&self, event: RunEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}
}
