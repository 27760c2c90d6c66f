//! Service layer for task creation, mutation, lookup, and listing.

use super::locks::TaskLocks;
use crate::task::{
    domain::{
        Task, TaskDraft, TaskFilter, TaskId, TaskPage, TaskPriority, TaskStatus,
        TaskValidationError, parse_title_macros, validate_draft,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the raw title, which may contain macros.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            deadline: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an explicit deadline, which takes precedence over a title macro.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets an explicit priority, which takes precedence over a title macro.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for updating an existing task.
///
/// Only fields set on the request override stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    priority: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch for the given task.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            deadline: None,
            priority: None,
        }
    }

    /// Replaces the title. Macros in the new title are extracted.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// A task field or list parameter broke a rule.
    #[error(transparent)]
    ValidationFailed(#[from] TaskValidationError),
    /// The storage collaborator failed.
    #[error(transparent)]
    Storage(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every read-check-write sequence on one task runs under that task's lock,
/// so concurrent callers and the overdue sweep never interleave on the same
/// record.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) clock: Arc<C>,
    pub(super) locks: Arc<TaskLocks>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            locks: Arc::new(TaskLocks::default()),
        }
    }

    /// Creates a task.
    ///
    /// Title macros fill only the priority and deadline the request left
    /// unset. New tasks start `ACTIVE` with `MEDIUM` priority unless told
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ValidationFailed`] when a field breaks a
    /// rule or [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let (title, macro_priority, macro_deadline) =
            parse_title_macros(&request.title).into_parts();

        let priority = explicit(request.priority)
            .or_else(|| macro_priority.map(|priority| priority.as_str().to_owned()))
            .unwrap_or_else(|| TaskPriority::default().as_str().to_owned());

        let draft = TaskDraft {
            title,
            description: request.description,
            deadline: request.deadline.or(macro_deadline),
            status: TaskStatus::Active.as_str().to_owned(),
            priority,
        };
        let fields = validate_draft(draft, self.clock.utc())?;
        let task = Task::new(fields, &*self.clock);

        self.repository
            .store(&task)
            .await
            .map_err(TaskLifecycleError::Storage)?;
        debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a patch to an existing task and recomputes its status.
    ///
    /// Precedence per field is: value on the request, then a macro found in
    /// a new title, then the stored value. Macros are only extracted when the
    /// request carries a title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::ValidationFailed`] when the patched task breaks a
    /// rule, or [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let _guard = self.locks.acquire(request.id).await;
        let mut task = self.load(request.id).await?;

        let (title, macro_priority, macro_deadline) = match request.title {
            Some(raw_title) => parse_title_macros(&raw_title).into_parts(),
            None => (task.title().to_owned(), None, None),
        };

        let priority = explicit(request.priority)
            .or_else(|| macro_priority.map(|priority| priority.as_str().to_owned()))
            .unwrap_or_else(|| task.priority().as_str().to_owned());

        let draft = TaskDraft {
            title,
            description: request
                .description
                .or_else(|| task.description().map(str::to_owned)),
            deadline: request.deadline.or(macro_deadline).or(task.deadline()),
            status: task.status().as_str().to_owned(),
            priority,
        };
        let fields = validate_draft(draft, self.clock.utc())?;
        task.apply_update(fields, &*self.clock);

        self.repository.update(&task).await?;
        debug!(task_id = %task.id(), status = %task.status(), "task updated");
        Ok(task)
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Storage`] when the lookup or removal fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let _guard = self.locks.acquire(id).await;
        self.load(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(TaskLifecycleError::Storage)?;
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Storage`] when the lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.load(id).await
    }

    /// Marks a task completed or reopens it, recomputing its status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn set_completion(
        &self,
        id: TaskId,
        is_completed: bool,
    ) -> TaskLifecycleResult<Task> {
        let _guard = self.locks.acquire(id).await;
        let mut task = self.load(id).await?;
        task.set_completion(is_completed, &*self.clock);

        self.repository.update(&task).await?;
        debug!(task_id = %id, status = %task.status(), "task completion changed");
        Ok(task)
    }

    /// Lists tasks matching `filter`.
    ///
    /// Parameters are checked before storage is touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ValidationFailed`] for an invalid filter
    /// or [`TaskLifecycleError::Storage`] when loading tasks fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<TaskPage> {
        let validated = filter.validate()?;
        let tasks = self
            .repository
            .find_all()
            .await
            .map_err(TaskLifecycleError::Storage)?;
        Ok(validated.apply(tasks))
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks.len()
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}

/// Treats an empty string the same as an absent value.
fn explicit(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
