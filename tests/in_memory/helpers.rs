//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    services::TaskLifecycleService,
};

/// Service type used by the in-memory suites.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

/// Provides a service over a fresh repository and the system clock.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Returns an instant comfortably after the current time.
#[must_use]
pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + TimeDelta::days(days)
}

/// Builds an active task with the given title for direct repository use.
#[must_use]
pub fn sample_task(title: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: None,
        deadline: None,
        status: TaskStatus::Active,
        priority: TaskPriority::Medium,
        is_completed: false,
        created_at: Utc::now(),
        updated_at: None,
    })
}
