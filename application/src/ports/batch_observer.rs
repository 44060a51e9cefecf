//! Batch observer port
//!
//! Receives per-run lifecycle callbacks from [`RunBatchUseCase`] and supplies
//! the listeners each run publishes to.
//!
//! [`RunBatchUseCase`]: crate::use_cases::run_batch::RunBatchUseCase

use super::event_listener::{DebateListener, ListenerError};
use super::lineup::Lineup;
use crate::use_cases::run_debate::RunDebateError;
use debate_domain::RunRecord;

/// Progress callbacks for a batch of debate runs
pub trait BatchObserver: Send + Sync {
    fn on_run_start(&self, _run_num: usize, _total: usize, _lineup: &Lineup) {}

    fn on_run_complete(&self, _record: &RunRecord) {}

    fn on_run_failed(&self, _run_num: usize, _error: &RunDebateError) {}
}

/// No-op observer
pub struct NoBatchObserver;

impl BatchObserver for NoBatchObserver {}

/// Builds the listener stack for one run
///
/// Implemented for any `Fn(usize, &Lineup) -> Result<Box<dyn DebateListener>, ListenerError>`.
pub trait RunListenerFactory {
    fn listener_for(
        &self,
        run_num: usize,
        lineup: &Lineup,
    ) -> Result<Box<dyn DebateListener>, ListenerError>;
}

impl<F> RunListenerFactory for F
where
    F: Fn(usize, &Lineup) -> Result<Box<dyn DebateListener>, ListenerError>,
{
    fn listener_for(
        &self,
        run_num: usize,
        lineup: &Lineup,
    ) -> Result<Box<dyn DebateListener>, ListenerError> {
        self(run_num, lineup)
    }
}
