//! Input/output sync capability
//!
//! Acquire downloads the script's declared inputs from the content store into
//! the working copy; release uploads the declared outputs.

use anyhow::Context as _;
use tracing::{debug, warn};

use crate::error::{ReplayError, ReplayResult};
use crate::lifecycle::{Capability, CapabilityKind, Run};

#[derive(Debug, Default)]
pub struct InputOutputSync;

impl InputOutputSync {
    pub fn new() -> Self {
        Self
    }
}

impl Capability for InputOutputSync {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::InputOutputSync
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let store = run.context().store();
        let inputs = run.script().inputs();

        // Nothing is copied unless every input is present
        if let Some(missing) = inputs.iter().find(|m| !store.exists(&m.store)) {
            return Err(ReplayError::MissingInput {
                path: missing.store.clone(),
            });
        }

        for mapping in inputs {
            let local = run.env.resolve(&mapping.local);
            debug!(store = %mapping.store, local = %local.display(), "downloading input");
            store
                .copy_to(&mapping.store, &local)
                .with_context(|| format!("download {}", mapping.store))
                .map_err(|e| ReplayError::acquire(self.kind(), e))?;
        }
        Ok(())
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        let store = run.context().store();
        let mut first_missing = None;
        let mut first_failure = None;

        // Every output gets its chance, whatever happened to the one before
        for mapping in run.script().outputs() {
            let local = run.env.resolve(&mapping.local);
            if !local.exists() {
                warn!(local = %local.display(), "declared output was not produced");
                first_missing.get_or_insert_with(|| mapping.local.clone());
                continue;
            }
            debug!(local = %local.display(), store = %mapping.store, "uploading output");
            let uploaded = store
                .copy_from(&mapping.store, &local)
                .with_context(|| format!("upload {}", mapping.local.display()));
            if let Err(err) = uploaded {
                warn!(store = %mapping.store, error = %err, "output upload failed");
                first_failure.get_or_insert(err);
            }
        }

        if let Some(path) = first_missing {
            return Err(ReplayError::MissingOutput { path });
        }
        match first_failure {
            Some(err) => Err(ReplayError::release(self.kind(), err)),
            None => Ok(()),
        }
    }
}
