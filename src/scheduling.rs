//! Recurring trigger for the overdue sweep.
//!
//! The scheduler owns timing only. Each tick calls
//! [`OverdueSweep::run_overdue_sweep`] once and logs the outcome.

use crate::todo::ports::OverdueSweep;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Runs the overdue sweep on a fixed interval.
pub struct OverdueSweepScheduler<T>
where
    T: OverdueSweep + 'static,
{
    target: Arc<T>,
    interval: Duration,
}

impl<T> OverdueSweepScheduler<T>
where
    T: OverdueSweep + 'static,
{
    /// Creates a scheduler that sweeps `target` every `interval`.
    #[must_use]
    pub const fn new(target: Arc<T>, interval: Duration) -> Self {
        Self { target, interval }
    }

    /// Invokes the sweep once and logs its outcome.
    pub async fn run_once(&self) {
        match self.target.run_overdue_sweep().await {
            Ok(report) if report.failed > 0 => {
                error!(
                    promoted = report.promoted,
                    failed = report.failed,
                    "overdue sweep finished with failures"
                );
            }
            Ok(report) => {
                info!(promoted = report.promoted, "overdue sweep finished");
            }
            Err(err) => {
                error!(error = %err, "overdue sweep failed");
            }
        }
    }

    /// Spawns the sweep loop on the current runtime.
    ///
    /// The first sweep runs immediately. The loop ends once `shutdown` holds
    /// `true` or its sender is dropped.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        info!(interval = ?self.interval, "overdue sweep scheduler is running");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.run_once().await,
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("overdue sweep scheduler stopped");
                            break;
                        }
                    }
                }
            }
        })
    }
}
