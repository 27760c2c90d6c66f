//! Periodic demotion of overdue tasks.

use super::lifecycle::TaskLifecycleService;
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use tracing::{error, info, warn};

/// Outcome counters for one overdue sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tasks loaded from storage.
    pub examined: usize,
    /// Tasks moved from `ACTIVE` to `OVERDUE`.
    pub transitioned: usize,
    /// Tasks whose demotion could not be persisted.
    pub failed: usize,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Moves every open `ACTIVE` task whose deadline has passed to
    /// `OVERDUE`.
    ///
    /// Completed, late, and already overdue tasks are left alone. The sweep
    /// is best-effort: storage failures are logged, counted, and skipped,
    /// and the sweep itself never fails.
    pub async fn sweep_overdue(&self) -> SweepReport {
        let now = self.clock.utc();
        let tasks = match self.repository.find_all().await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(error = %err, "overdue sweep could not load tasks");
                return SweepReport::default();
            }
        };

        let mut report = SweepReport {
            examined: tasks.len(),
            ..SweepReport::default()
        };
        let candidates = tasks
            .iter()
            .filter(|task| task.is_overdue_at(now))
            .map(|task| task.id());

        for task_id in candidates {
            match self.demote(task_id).await {
                Ok(true) => report.transitioned += 1,
                Ok(false) => {}
                Err(err) => {
                    report.failed += 1;
                    warn!(task_id = %task_id, error = %err, "failed to mark task overdue");
                }
            }
        }

        info!(
            examined = report.examined,
            transitioned = report.transitioned,
            failed = report.failed,
            "overdue sweep finished"
        );
        report
    }

    /// Re-reads one task under its lock and demotes it if it still
    /// qualifies.
    async fn demote(&self, task_id: TaskId) -> TaskRepositoryResult<bool> {
        let _guard = self.locks.acquire(task_id).await;
        let Some(mut task) = self.repository.find_by_id(task_id).await? else {
            return Ok(false);
        };
        if !task.mark_overdue(&*self.clock) {
            return Ok(false);
        }

        self.repository.update(&task).await?;
        info!(task_id = %task_id, "task marked overdue");
        Ok(true)
    }
}
