//! Application services for task lifecycle orchestration.

mod lifecycle;
mod locks;
mod scheduler;
mod sweep;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
#[cfg(test)]
pub(crate) use locks::TaskLocks;
pub use scheduler::SweepScheduler;
pub use sweep::SweepReport;
