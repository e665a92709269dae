//! Dependency sandbox capability
//!
//! Puts a cached sandbox holding the script's packages in front of the
//! command search path. The sandbox is built on the first run that needs its
//! dependency set and reused afterwards; it is never deleted by a run.

use std::path::Path;

use anyhow::Context as _;
use tracing::{debug, info};

use crate::domain::ports::{CommandSpec, RunEvent};
use crate::domain::value_objects::{CacheKey, EnvironmentOverlay, PATH_VAR};
use crate::error::{ReplayError, ReplayResult};
use crate::lifecycle::{Capability, CapabilityKind, Run, SandboxReport};
use crate::sandbox::DependencyCache;

/// Directory inside a sandbox holding its executables
const BIN_DIR: &str = "bin";

#[derive(Debug)]
pub struct DependencySandbox {
    cache: DependencyCache,
    index_url: Option<String>,
    builder: Vec<String>,
    installer: Vec<String>,
    overlay: Option<EnvironmentOverlay>,
}

impl DependencySandbox {
    pub fn new(cache: DependencyCache) -> Self {
        Self {
            cache,
            index_url: None,
            builder: vec!["virtualenv".to_string()],
            installer: vec!["pip".to_string()],
            overlay: None,
        }
    }

    pub fn with_index_url(mut self, index_url: Option<String>) -> Self {
        self.index_url = index_url;
        self
    }

    /// Command creating an empty sandbox; the directory is appended
    pub fn with_builder(mut self, builder: Vec<String>) -> Self {
        self.builder = builder;
        self
    }

    /// Package installer; `install`, the index and the specifier are appended
    pub fn with_installer(mut self, installer: Vec<String>) -> Self {
        self.installer = installer;
        self
    }

    pub fn cache(&self) -> &DependencyCache {
        &self.cache
    }

    /// Installer command for one specifier
    pub fn install_command(&self, specifier: &str) -> ReplayResult<CommandSpec> {
        let mut command = CommandSpec::from_argv(&self.installer)
            .map_err(|e| ReplayError::acquire(self.kind(), e))?
            .arg("install");
        if let Some(url) = &self.index_url {
            command = command.arg(format!("--index-url={url}"));
        }
        Ok(command.arg(specifier))
    }

    fn build(&self, run: &Run<'_>, dir: &Path) -> ReplayResult<()> {
        info!(dir = %dir.display(), "building dependency sandbox");
        let builder = CommandSpec::from_argv(&self.builder)
            .map_err(|e| ReplayError::acquire(self.kind(), e))?
            .arg(dir.display().to_string());
        let result = run
            .run_command(&builder)
            .with_context(|| format!("run {builder}"))
            .map_err(|e| ReplayError::acquire(self.kind(), e))?;
        if !result.success() {
            return Err(ReplayError::acquire(
                self.kind(),
                anyhow::anyhow!("{builder} exited with {result}"),
            ));
        }

        for specifier in run.script().dependencies() {
            let install = self.install_command(specifier)?;
            let result = run
                .run_command(&install)
                .with_context(|| format!("run {install}"))
                .map_err(|e| ReplayError::acquire(self.kind(), e))?;
            if !result.success() {
                return Err(ReplayError::DependencyInstall {
                    specifier: specifier.clone(),
                    result,
                });
            }
        }
        Ok(())
    }
}

impl Capability for DependencySandbox {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::DependencySandbox
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let cache = &self.cache;
        let key = CacheKey::from_specifiers(run.script().dependencies());

        let overlay = run.env.overlay(PATH_VAR);
        if let Err(err) = run.env.prepend_path(&cache.sandbox_dir(&key).join(BIN_DIR)) {
            overlay.restore(&mut run.env);
            return Err(ReplayError::acquire(self.kind(), err));
        }

        let entry = match cache.ensure(&key, |target| self.build(run, target)) {
            Ok(entry) => entry,
            Err(err) => {
                overlay.restore(&mut run.env);
                return Err(err);
            }
        };

        debug!(dir = %entry.dir.display(), reused = entry.reused, "dependency sandbox ready");
        run.emit(if entry.reused {
            RunEvent::SandboxReused {
                path: entry.dir.clone(),
            }
        } else {
            RunEvent::SandboxBuilt {
                path: entry.dir.clone(),
            }
        });
        run.report.sandbox = Some(SandboxReport {
            dir: entry.dir,
            reused: entry.reused,
        });
        self.overlay = Some(overlay);
        Ok(())
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        if let Some(overlay) = self.overlay.take() {
            overlay.restore(&mut run.env);
        }
        Ok(())
    }
}
