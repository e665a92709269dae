//! Resource lifecycle
//!
//! A run is protected by a chain of capabilities. Each capability acquires
//! one resource (a directory, a search-path entry, a database, ...) and
//! releases it again. The [`CapabilityChain`] owns ordering: acquire in
//! declared order, roll back on failure, release in reverse.

mod chain;
mod run;

pub use chain::CapabilityChain;
pub use run::{Run, RunReport, SandboxReport};

pub use crate::domain::value_objects::CapabilityKind;

use crate::error::ReplayResult;

/// Two-phase resource contract
///
/// `release` is called exactly once for every successful `acquire`, and never
/// after a failed one. A capability whose `acquire` fails must undo its own
/// partial work before returning the error.
pub trait Capability {
    fn kind(&self) -> CapabilityKind;

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()>;

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()>;
}

impl<C: Capability + ?Sized> Capability for Box<C> {
    fn kind(&self) -> CapabilityKind {
        (**self).kind()
    }

    fn acquire(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        (**self).acquire(run)
    }

    fn release(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        (**self).release(run)
    }
}
