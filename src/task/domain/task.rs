//! Task aggregate root and its enumerated attributes.

use super::{
    ParseTaskPriorityError, ParseTaskStatusError, TaskId, ValidatedTask, resolve_status,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived task status.
///
/// Always computed from the completion flag and the deadline; clients never
/// set it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Open task whose deadline, if any, has not passed.
    Active,
    /// Task completed on time.
    Completed,
    /// Open task whose deadline has passed.
    Overdue,
    /// Task completed after its deadline.
    Late,
}

impl TaskStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Completed, Self::Overdue, Self::Late];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Overdue => "OVERDUE",
            Self::Late => "LATE",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Lowest priority.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Elevated priority.
    High,
    /// Highest priority.
    Critical,
}

impl TaskPriority {
    /// All priorities from lowest to highest.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Returns the ordinal rank used for sorting (`LOW` = 1, `CRITICAL` = 4).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| ParseTaskPriorityError(value.to_owned()))
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    priority: TaskPriority,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted status snapshot.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp, if the task was ever mutated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new open task from validated fields.
    ///
    /// The status is taken from the validated fields as-is; creation does
    /// not run the status resolver.
    #[must_use]
    pub fn new(fields: ValidatedTask, clock: &impl Clock) -> Self {
        let ValidatedTask {
            title,
            description,
            deadline,
            status,
            priority,
        } = fields;

        Self {
            id: TaskId::new(),
            title,
            description,
            deadline,
            status,
            priority,
            is_completed: false,
            created_at: clock.utc(),
            updated_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            status: data.status,
            priority: data.priority,
            is_completed: data.is_completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the status snapshot computed at the last mutation.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns whether the task is marked completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replaces the editable fields and recomputes the status.
    ///
    /// The status stored in `fields` is ignored; the resolver derives a
    /// fresh one from the current completion flag and the new deadline.
    pub fn apply_update(&mut self, fields: ValidatedTask, clock: &impl Clock) {
        let now = clock.utc();
        self.title = fields.title;
        self.description = fields.description;
        self.deadline = fields.deadline;
        self.priority = fields.priority;
        self.status = resolve_status(self.is_completed, self.deadline, now);
        self.updated_at = Some(now);
    }

    /// Sets the completion flag and recomputes the status.
    pub fn set_completion(&mut self, is_completed: bool, clock: &impl Clock) {
        let now = clock.utc();
        self.is_completed = is_completed;
        self.status = resolve_status(self.is_completed, self.deadline, now);
        self.updated_at = Some(now);
    }

    /// Returns whether the overdue sweep should demote this task at `now`.
    ///
    /// Only open `ACTIVE` tasks whose deadline has passed qualify.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed
            && self.status == TaskStatus::Active
            && self.deadline.is_some_and(|due| due < now)
    }

    /// Demotes an `ACTIVE` task whose deadline has passed to `OVERDUE`.
    ///
    /// Returns `false` and leaves the task untouched when it does not
    /// qualify.
    pub fn mark_overdue(&mut self, clock: &impl Clock) -> bool {
        let now = clock.utc();
        if !self.is_overdue_at(now) {
            return false;
        }
        self.status = TaskStatus::Overdue;
        self.updated_at = Some(now);
        true
    }
}
