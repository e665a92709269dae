//! Capability kind value object - the closed set of run capabilities

use serde::Serialize;

/// Which resource a capability manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    /// Clean copy of the script directory to run in
    WorkingDirectory,
    /// Cached dependency environment on the command search path
    DependencySandbox,
    /// Input download and output upload against the content store
    InputOutputSync,
    /// Ephemeral database for the run
    ScratchDatabase,
    /// The script's entry point itself
    ScriptExecution,
}

impl CapabilityKind {
    /// Stable identifier used in event streams
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::WorkingDirectory => "working_directory",
            CapabilityKind::DependencySandbox => "dependency_sandbox",
            CapabilityKind::InputOutputSync => "input_output_sync",
            CapabilityKind::ScratchDatabase => "scratch_database",
            CapabilityKind::ScriptExecution => "script_execution",
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityKind::WorkingDirectory => write!(f, "working directory"),
            CapabilityKind::DependencySandbox => write!(f, "dependency sandbox"),
            CapabilityKind::InputOutputSync => write!(f, "input/output sync"),
            CapabilityKind::ScratchDatabase => write!(f, "scratch database"),
            CapabilityKind::ScriptExecution => write!(f, "script execution"),
        }
    }
}
