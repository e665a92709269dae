//! Built-in capabilities
//!
//! Every capability a run can hold, as one closed enum. The chain itself is
//! generic over [`Capability`]; [`Plugin`] is what the runner puts in it.

mod dependency_sandbox;
mod input_output_sync;
mod scratch_database;
mod script_execution;
mod working_directory;

pub use dependency_sandbox::DependencySandbox;
pub use input_output_sync::InputOutputSync;
pub use scratch_database::{database_name, ScratchDatabase};
pub use script_execution::ScriptExecution;
pub use working_directory::{Placement, WorkingDirectory};

use crate::error::ReplayResult;
use crate::lifecycle::{Capability, CapabilityKind, Run};

#[derive(Debug)]
pub enum Plugin {
    WorkingDirectory(WorkingDirectory),
    DependencySandbox(DependencySandbox),
    InputOutputSync(InputOutputSync),
    ScratchDatabase(ScratchDatabase),
    ScriptExecution(ScriptExecution),
}

impl Capability for Plugin {
    fn kind(&self) -> CapabilityKind {
        match self {
            Plugin::WorkingDirectory(c) => c.kind(),
            Plugin::DependencySandbox(c) => c.kind(),
            Plugin::InputOutputSync(c) => c.kind(),
            Plugin::ScratchDatabase(c) => c.kind(),
            Plugin::ScriptExecution(c) => c.kind(),
        }
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        match self {
            Plugin::WorkingDirectory(c) => c.acquire(run),
            Plugin::DependencySandbox(c) => c.acquire(run),
            Plugin::InputOutputSync(c) => c.acquire(run),
            Plugin::ScratchDatabase(c) => c.acquire(run),
            Plugin::ScriptExecution(c) => c.acquire(run),
        }
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        match self {
            Plugin::WorkingDirectory(c) => c.release(run),
            Plugin::DependencySandbox(c) => c.release(run),
            Plugin::InputOutputSync(c) => c.release(run),
            Plugin::ScratchDatabase(c) => c.release(run),
            Plugin::ScriptExecution(c) => c.release(run),
        }
    }
}

impl From<WorkingDirectory> for Plugin {
    fn from(c: WorkingDirectory) -> Self {
        Plugin::WorkingDirectory(c)
    }
}

impl From<DependencySandbox> for Plugin {
    fn from(c: DependencySandbox) -> Self {
        Plugin::DependencySandbox(c)
    }
}

impl From<InputOutputSync> for Plugin {
    fn from(c: InputOutputSync) -> Self {
        Plugin::InputOutputSync(c)
    }
}

impl From<ScratchDatabase> for Plugin {
    fn from(c: ScratchDatabase) -> Self {
        Plugin::ScratchDatabase(c)
    }
}

impl From<ScriptExecution> for Plugin {
    fn from(c: ScriptExecution) -> Self {
        Plugin::ScriptExecution(c)
    }
}
