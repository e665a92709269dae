//! Scratch database capability
//!
//! Scripts with the `uses psql` option get a freshly created database for the
//! duration of the run, announced through the database variable (PGDATABASE
//! by default). The database is dropped on release unless both `debug` and
//! `keep database` are set.

use anyhow::Context as _;
use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::domain::entities::{options, Script};
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{Environment, EnvironmentOverlay};
use crate::error::{ReplayError, ReplayResult};
use crate::lifecycle::{Capability, CapabilityKind, Run};

/// Variables consulted for the user name, in order
const USER_VARS: &[&str] = &["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Database name: `<user>_<script>_<YYYYmmddHHMMSS><microseconds>`
pub fn database_name(user: &str, script: &str, at: DateTime<Local>) -> String {
    format!("{user}_{script}_{}", at.format("%Y%m%d%H%M%S%6f"))
}

#[derive(Debug)]
struct Held {
    database: String,
    overlay: EnvironmentOverlay,
}

#[derive(Debug)]
pub struct ScratchDatabase {
    enabled: bool,
    keep: bool,
    config: DatabaseConfig,
    held: Option<Held>,
}

impl ScratchDatabase {
    pub fn new(script: &Script, config: DatabaseConfig) -> Self {
        Self {
            enabled: script.has_option(options::USES_PSQL),
            keep: script.has_option(options::DEBUG) && script.has_option(options::KEEP_DATABASE),
            config,
            held: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the database survives release
    pub fn keeps_database(&self) -> bool {
        self.keep
    }

    /// Name of the database, while acquired
    pub fn database(&self) -> Option<&str> {
        self.held.as_ref().map(|h| h.database.as_str())
    }

    fn user(&self, env: &Environment) -> anyhow::Result<String> {
        if let Some(user) = &self.config.user {
            return Ok(user.clone());
        }
        USER_VARS
            .iter()
            .filter_map(|var| env.get(var))
            .find(|value| !value.is_empty())
            .map(str::to_string)
            .context("cannot determine user name for the database (set database.user)")
    }

    fn command(&self, argv: &[String], database: &str) -> anyhow::Result<CommandSpec> {
        Ok(CommandSpec::from_argv(argv)?.arg(database))
    }

    fn create(&self, run: &Run<'_>, database: &str) -> anyhow::Result<()> {
        let command = self.command(&self.config.create, database)?;
        let result = run
            .run_command(&command)
            .with_context(|| format!("run {command}"))?;
        anyhow::ensure!(result.success(), "{command} exited with {result}");
        Ok(())
    }

    fn drop_database(&self, run: &Run<'_>, database: &str) -> anyhow::Result<()> {
        let command = self.command(&self.config.drop, database)?;
        let result = run
            .run_command(&command)
            .with_context(|| format!("run {command}"))?;
        anyhow::ensure!(result.success(), "{command} exited with {result}");
        Ok(())
    }
}

impl Capability for ScratchDatabase {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ScratchDatabase
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let user = self
            .user(&run.env)
            .map_err(|e| ReplayError::acquire(self.kind(), e))?;
        let database = database_name(&user, run.script().name().as_str(), Local::now());

        let overlay = run.env.overlay(&self.config.env_var);
        run.env.set(self.config.env_var.clone(), database.clone());
        if let Err(err) = self.create(run, &database) {
            overlay.restore(&mut run.env);
            return Err(ReplayError::acquire(self.kind(), err));
        }

        info!(database = %database, "scratch database created");
        run.report.database = Some(database.clone());
        self.held = Some(Held { database, overlay });
        Ok(())
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let Some(Held { database, overlay }) = self.held.take() else {
            return Ok(());
        };
        overlay.restore(&mut run.env);

        if self.keep {
            info!(database = %database, "keeping scratch database");
            return Ok(());
        }
        debug!(database = %database, "dropping scratch database");
        self.drop_database(run, &database)
            .map_err(|e| ReplayError::release(self.kind(), e))
    }
}
