//! Capability chain
//!
//! Acquires capabilities in declared order and releases them in reverse.
//! Acquired capabilities always form a prefix of the chain: capability `k+1`
//! is never acquired before `k`, and `k` is never released while `k+1` is
//! still held.

use tracing::{debug, warn};

use super::{Capability, Run};
use crate::domain::ports::RunEvent;
use crate::error::{ReplayError, ReplayResult};

struct Link<C> {
    capability: C,
    acquired: bool,
}

/// Ordered capabilities plus which of them are currently held
pub struct CapabilityChain<C> {
    links: Vec<Link<C>>,
}

impl<C: Capability> CapabilityChain<C> {
    pub fn new(capabilities: impl IntoIterator<Item = C>) -> Self {
        Self {
            links: capabilities
                .into_iter()
                .map(|capability| Link {
                    capability,
                    acquired: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of capabilities currently held
    pub fn acquired_count(&self) -> usize {
        self.links.iter().filter(|l| l.acquired).count()
    }

    /// Whether every capability is held
    pub fn is_open(&self) -> bool {
        self.links.iter().all(|l| l.acquired)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &C> {
        self.links.iter().map(|l| &l.capability)
    }

    /// Acquire every capability not yet held, in order
    ///
    /// When one fails, everything acquired so far is released in reverse
    /// order and the acquire error is returned. Errors raised during that
    /// rollback are logged only.
    pub fn open(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        for index in 0..self.links.len() {
            let link = &mut self.links[index];
            if link.acquired {
                continue;
            }
            let kind = link.capability.kind();
            debug!(capability = %kind, index, "acquiring");
            match link.capability.acquire(run) {
                Ok(()) => {
                    link.acquired = true;
                    run.emit(RunEvent::Acquired { capability: kind });
                }
                Err(error) => {
                    warn!(capability = %kind, error = %error, "acquire failed, rolling back");
                    run.emit(RunEvent::AcquireFailed {
                        capability: kind,
                        error: error.to_string(),
                    });
                    if let Some(secondary) = self.release_acquired(run) {
                        warn!(error = %secondary, "rollback failed");
                    }
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Release every held capability in reverse order
    ///
    /// Teardown is exhaustive: a failing release does not stop the ones
    /// before it. The first failure is returned.
    pub fn close(&mut self, run: &mut Run<'_>) -> ReplayResult<()> {
        match self.release_acquired(run) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Open the chain, run `work`, then close the chain whatever happened
    ///
    /// A failure of `work` takes priority over release failures, which are
    /// then only logged.
    pub fn run_with<T, F>(&mut self, run: &mut Run<'_>, work: F) -> ReplayResult<T>
    where
        F: FnOnce(&mut Run<'_>) -> ReplayResult<T>,
    {
        self.open(run)?;
        let outcome = work(run);
        let teardown = self.close(run);
        match (outcome, teardown) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(error)) => Err(error),
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(secondary)) => {
                warn!(error = %secondary, "release failed after earlier error");
                Err(error)
            }
        }
    }

    fn release_acquired(&mut self, run: &mut Run<'_>) -> Option<ReplayError> {
        let mut first_error = None;
        for link in self.links.iter_mut().rev().filter(|l| l.acquired) {
            // Cleared first so a failing release is never retried
            link.acquired = false;
            let kind = link.capability.kind();
            debug!(capability = %kind, "releasing");
            match link.capability.release(run) {
                Ok(()) => run.emit(RunEvent::Released { capability: kind }),
                Err(error) => {
                    warn!(capability = %kind, error = %error, "release failed");
                    run.emit(RunEvent::ReleaseFailed {
                        capability: kind,
                        error: error.to_string(),
                    });
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
        first_error
    }
}
