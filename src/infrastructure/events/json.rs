//! JSON Event Sink
//!
//! Outputs run events as NDJSON for CI/automation consumption.

use crate::domain::ports::{RunEvent, RunEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Render an event as one JSON object
pub fn event_to_json(event: &RunEvent) -> serde_json::Value {
    match event {
        RunEvent::Started { script } => serde_json::json!({
            "event": "start",
            "command": "run",
            "script": script,
        }),

        RunEvent::Acquired { capability } => serde_json::json!({
            "event": "acquired",
            "command": "run",
            "capability": capability.as_str(),
        }),

        RunEvent::AcquireFailed { capability, error } => serde_json::json!({
            "event": "acquire_failed",
            "command": "run",
            "capability": capability.as_str(),
            "error": error,
        }),

        RunEvent::Released { capability } => serde_json::json!({
            "event": "released",
            "command": "run",
            "capability": capability.as_str(),
        }),

        RunEvent::ReleaseFailed { capability, error } => serde_json::json!({
            "event": "release_failed",
            "command": "run",
            "capability": capability.as_str(),
            "error": error,
        }),

        RunEvent::SandboxReused { path } => serde_json::json!({
            "event": "sandbox_reused",
            "command": "run",
            "path": path.display().to_string(),
        }),

        RunEvent::SandboxBuilt { path } => serde_json::json!({
            "event": "sandbox_built",
            "command": "run",
            "path": path.display().to_string(),
        }),

        RunEvent::CommandFinished { command, status } => serde_json::json!({
            "event": "command_finished",
            "command": "run",
            "process": command,
            "status": status,
        }),

        RunEvent::Finished { success } => serde_json::json!({
            "event": "complete",
            "command": "run",
            "success": success,
        }),
    }
}

impl RunEventSink for JsonEventSink {
    fn on_event(&self, event: RunEvent) {
        self.write_event(event_to_json(&event));
    }
}
