//! Script execution capability
//!
//! Runs the script's entry point with the configured interpreter inside the
//! run's working directory and environment. Scripts without an entry point
//! only exercise the other capabilities.

use anyhow::Context as _;
use tracing::info;

use crate::domain::ports::CommandSpec;
use crate::error::{ReplayError, ReplayResult};
use crate::lifecycle::{Capability, CapabilityKind, Run};

#[derive(Debug)]
pub struct ScriptExecution {
    interpreter: Vec<String>,
}

impl ScriptExecution {
    pub fn new(interpreter: Vec<String>) -> Self {
        Self { interpreter }
    }
}

impl Default for ScriptExecution {
    fn default() -> Self {
        Self::new(vec!["python".to_string()])
    }
}

impl Capability for ScriptExecution {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ScriptExecution
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let Some(entry_point) = run.script().entry_point() else {
            return Ok(());
        };
        let command = CommandSpec::from_argv(&self.interpreter)
            .map_err(|e| ReplayError::acquire(self.kind(), e))?
            .arg(entry_point.display().to_string());

        info!(script = %run.script().name(), command = %command, "executing script");
        let result = run
            .run_command(&command)
            .with_context(|| format!("run {command}"))
            .map_err(|e| ReplayError::acquire(self.kind(), e))?;
        run.report.execution = Some(result.clone());

        if !result.success() {
            return Err(ReplayError::ScriptFailure { result });
        }
        Ok(())
    }

    fn release(&mut self, _run: &mut Run<'_>) -> ReplayResult<()> {
        Ok(())
    }
}
