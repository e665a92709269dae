//! Per-run state shared by the capabilities of one chain

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::application::Context;
use crate::domain::entities::{ExecutionResult, Script};
use crate::domain::ports::{CommandSpec, RunEvent};
use crate::domain::value_objects::Environment;

/// Dependency sandbox used by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandboxReport {
    pub dir: PathBuf,
    /// Found in the cache rather than built by this run
    pub reused: bool,
}

/// What a run set up and produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub working_dir: Option<PathBuf>,
    pub sandbox: Option<SandboxReport>,
    pub database: Option<String>,
    pub execution: Option<ExecutionResult>,
}

/// One run: the shared context, the script, and the mutable environment the
/// capabilities work on
pub struct Run<'a> {
    context: &'a Context,
    script: &'a Script,
    /// Working directory and variables every command of this run sees
    pub env: Environment,
    pub report: RunReport,
}

impl<'a> Run<'a> {
    pub fn new(context: &'a Context, script: &'a Script, env: Environment) -> Self {
        Self {
            context,
            script,
            env,
            report: RunReport::default(),
        }
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    pub fn script(&self) -> &'a Script {
        self.script
    }

    pub fn emit(&self, event: RunEvent) {
        self.context.events().on_event(event);
    }

    /// Run an external command in this run's environment
    pub fn run_command(&self, command: &CommandSpec) -> io::Result<ExecutionResult> {
        debug!(script = %self.script.name(), command = %command, "running command");
        let result = self.context.runner().run(command, &self.env)?;
        debug!(command = %command, status = result.status, "command finished");
        self.emit(RunEvent::CommandFinished {
            command: command.to_string(),
            status: result.status,
        });
        Ok(result)
    }
}
