//! Working directory capability
//!
//! Copies the script's source tree into a fresh directory and makes that the
//! run's current directory. Release switches back and deletes the copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::config::WorkdirMode;
use crate::error::{ReplayError, ReplayResult};
use crate::infrastructure::fs::copy_tree;
use crate::lifecycle::{Capability, CapabilityKind, Run};

/// Child of the temporary directory the tree is copied into
const EPHEMERAL_CHILD: &str = "work";

/// Where the working copy goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A given directory, which must not exist yet
    InPlace(PathBuf),
    /// A fresh temporary directory
    Ephemeral,
}

/// State held between acquire and release
#[derive(Debug)]
struct Held {
    original_dir: PathBuf,
    copy: PathBuf,
    temp: Option<TempDir>,
}

#[derive(Debug)]
pub struct WorkingDirectory {
    placement: Placement,
    held: Option<Held>,
}

impl WorkingDirectory {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            held: None,
        }
    }

    pub fn in_place(dir: impl Into<PathBuf>) -> Self {
        Self::new(Placement::InPlace(dir.into()))
    }

    pub fn ephemeral() -> Self {
        Self::new(Placement::Ephemeral)
    }

    /// Placement from `[workdir]` settings, relative paths taken from `base`
    pub fn from_settings(mode: WorkdirMode, path: Option<&Path>, base: &Path) -> ReplayResult<Self> {
        match (mode, path) {
            (WorkdirMode::Ephemeral, _) => Ok(Self::ephemeral()),
            (WorkdirMode::InPlace, Some(path)) => Ok(Self::in_place(base.join(path))),
            (WorkdirMode::InPlace, None) => Err(ReplayError::acquire(
                CapabilityKind::WorkingDirectory,
                anyhow::anyhow!("in_place working directory needs workdir.path"),
            )),
        }
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// The working copy, while acquired
    pub fn path(&self) -> Option<&Path> {
        self.held.as_ref().map(|h| h.copy.as_path())
    }

    fn copy_in_place(source: &Path, target: &Path) -> anyhow::Result<()> {
        if let Err(err) = copy_tree(source, target) {
            // An existing target is not ours to delete
            if err.kind() != io::ErrorKind::AlreadyExists && target.exists() {
                if let Err(cleanup) = fs::remove_dir_all(target) {
                    warn!(
                        dir = %target.display(),
                        error = %cleanup,
                        "failed to remove partial working copy"
                    );
                }
            }
            return Err(err).with_context(|| {
                format!("copy {} to {}", source.display(), target.display())
            });
        }
        Ok(())
    }

    fn copy_ephemeral(source: &Path) -> anyhow::Result<(TempDir, PathBuf)> {
        let temp = tempfile::Builder::new()
            .prefix("replay-")
            .tempdir()
            .context("create temporary directory")?;
        let target = temp.path().join(EPHEMERAL_CHILD);
        copy_tree(source, &target)
            .with_context(|| format!("copy {} to {}", source.display(), target.display()))?;
        Ok((temp, target))
    }

    fn try_acquire(&self, run: &mut Run<'_>) -> anyhow::Result<Held> {
        let original_dir = run.env.current_dir().to_path_buf();
        let source = run.env.resolve(run.script().dir());

        let (copy, temp) = match &self.placement {
            Placement::InPlace(target) => {
                let target = run.env.resolve(target);
                Self::copy_in_place(&source, &target)?;
                (target, None)
            }
            Placement::Ephemeral => {
                let (temp, target) = Self::copy_ephemeral(&source)?;
                (target, Some(temp))
            }
        };

        if let Err(err) = run.env.change_dir(&copy) {
            let cleanup = match temp {
                Some(temp) => temp.close(),
                None => fs::remove_dir_all(&copy),
            };
            if let Err(cleanup) = cleanup {
                warn!(dir = %copy.display(), error = %cleanup, "could not remove working copy");
            }
            return Err(err).context("enter working copy");
        }

        Ok(Held {
            original_dir,
            copy,
            temp,
        })
    }
}

impl Capability for WorkingDirectory {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::WorkingDirectory
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let held = self
            .try_acquire(run)
            .map_err(|e| ReplayError::acquire(self.kind(), e))?;
        debug!(dir = %held.copy.display(), "working copy ready");
        run.report.working_dir = Some(held.copy.clone());
        self.held = Some(held);
        Ok(())
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let Some(held) = self.held.take() else {
            return Ok(());
        };

        let switched = run
            .env
            .change_dir(&held.original_dir)
            .with_context(|| format!("return to {}", held.original_dir.display()));
        if let Err(err) = &switched {
            warn!(error = %format!("{err:#}"), "could not leave working copy");
        }

        let removed = match held.temp {
            Some(temp) => temp.close(),
            None => fs::remove_dir_all(&held.copy),
        }
        .with_context(|| format!("delete {}", held.copy.display()));

        switched
            .and(removed)
            .map_err(|e| ReplayError::release(self.kind(), e))
    }
}
