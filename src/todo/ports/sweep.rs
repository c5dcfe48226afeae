//! Driving port for the scheduled overdue sweep.

use super::TodoRepositoryResult;
use async_trait::async_trait;

/// Outcome of one overdue sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverdueSweepReport {
    /// Items promoted to past due and persisted.
    pub promoted: usize,
    /// Items whose promotion could not be persisted.
    pub failed: usize,
}

/// Batch overdue check invoked by a recurring trigger.
#[async_trait]
pub trait OverdueSweep: Send + Sync {
    /// Promotes every overdue not-done item to past due.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the candidate lookup fails. Failures
    /// persisting individual items are counted in the report instead.
    async fn run_overdue_sweep(&self) -> TodoRepositoryResult<OverdueSweepReport>;
}
