//! Fixed-interval runner for the overdue sweep.

use super::lifecycle::TaskLifecycleService;
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Shortest interval the scheduler accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Runs [`TaskLifecycleService::sweep_overdue`] on a fixed cadence.
pub struct SweepScheduler<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, C>,
    interval: Duration,
}

impl<R, C> SweepScheduler<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler. Intervals shorter than one millisecond are
    /// raised to one millisecond.
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>, interval: Duration) -> Self {
        Self {
            service,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Returns the effective sweep interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sweeps immediately and then once per interval until `shutdown`
    /// turns `true` or its sender is dropped.
    ///
    /// A sweep in progress always runs to completion before shutdown is
    /// observed.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_ms = self.interval.as_millis(), "overdue sweep scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.service.sweep_overdue().await;
                    debug!(transitioned = report.transitioned, "scheduled sweep ran");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("overdue sweep scheduler stopped");
    }
}
