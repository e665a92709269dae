//! ExecutionResult entity - outcome of one external command

use serde::Serialize;
use std::fmt;

/// Exit status and captured output of an external command
///
/// Produced once per invocation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Exit status; `-1` when the process was terminated by a signal
    pub status: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A zero-status result with no output
    pub fn ok() -> Self {
        Self::new(0, "", "")
    }

    /// Whether the command exited with status zero
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit status {}", self.status)?;
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, " (stderr: {})", stderr)?;
        }
        Ok(())
    }
}
