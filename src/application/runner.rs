//! Run use case
//!
//! Wires a context and a script into a capability chain and drives it:
//! 1. Copy the script into a working directory and enter it
//! 2. Put the dependency sandbox on the search path, building it if needed
//! 3. Download inputs
//! 4. Create the scratch database (scripts with `uses psql` only)
//! 5. Execute the entry point
//!
//! Everything is released in reverse order, whatever happened.

use tracing::{info, warn};

use crate::domain::entities::Script;
use crate::domain::ports::RunEvent;
use crate::domain::value_objects::Environment;
use crate::error::ReplayResult;
use crate::lifecycle::{CapabilityChain, Run, RunReport};
use crate::plugins::{
    DependencySandbox, InputOutputSync, Plugin, ScratchDatabase, ScriptExecution,
    WorkingDirectory,
};
use crate::sandbox::DependencyCache;

use super::Context;

/// Runs one script against a context
pub struct Runner<'a> {
    context: &'a Context,
    script: &'a Script,
}

impl<'a> Runner<'a> {
    pub fn new(context: &'a Context, script: &'a Script) -> Self {
        Self { context, script }
    }

    /// Capabilities of a run, in acquire order
    pub fn plugins(&self) -> ReplayResult<Vec<Plugin>> {
        let settings = self.context.settings();

        let working_directory = WorkingDirectory::from_settings(
            settings.workdir.mode,
            settings.workdir.path.as_deref(),
            self.context.base_dir(),
        )?;
        let sandbox = DependencySandbox::new(DependencyCache::new(
            self.context.sandbox_parent_dir(),
        ))
        .with_index_url(self.context.index_url().map(str::to_string))
        .with_builder(settings.sandbox.builder.clone())
        .with_installer(settings.sandbox.installer.clone());

        Ok(vec![
            working_directory.into(),
            sandbox.into(),
            InputOutputSync::new().into(),
            ScratchDatabase::new(self.script, settings.database.clone()).into(),
            ScriptExecution::new(settings.execution.interpreter.clone()).into(),
        ])
    }

    /// Run in a snapshot of the calling process' environment
    pub fn run(&self) -> ReplayResult<RunReport> {
        self.run_in(Environment::from_process()?)
    }

    /// Run in `env`
    ///
    /// Returns what the run set up and produced, or the first fatal error:
    /// an acquire or script failure beats any release failure.
    pub fn run_in(&self, env: Environment) -> ReplayResult<RunReport> {
        let name = self.script.name().to_string();
        info!(script = %name, "run started");
        self.context
            .events()
            .on_event(RunEvent::Started { script: name.clone() });

        let outcome = self.drive(env);

        match &outcome {
            Ok(_) => info!(script = %name, "run succeeded"),
            Err(e) => warn!(script = %name, error = %e, "run failed"),
        }
        self.context.events().on_event(RunEvent::Finished {
            success: outcome.is_ok(),
        });
        outcome
    }

    fn drive(&self, env: Environment) -> ReplayResult<RunReport> {
        let mut chain = CapabilityChain::new(self.plugins()?);
        let mut run = Run::new(self.context, self.script, env);
        chain.run_with(&mut run, |_| Ok(()))?;
        Ok(run.report)
    }
}
