//! Task field validation.

use super::{TaskPriority, TaskStatus, TaskValidationError};
use chrono::{DateTime, Utc};

/// Minimum number of characters in a trimmed title.
pub const MIN_TITLE_LENGTH: usize = 4;

/// Unvalidated task fields as assembled by the lifecycle service.
///
/// Status and priority are kept as text so that values outside the
/// enumerated sets can be reported in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title with macros already extracted.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Status in canonical text form.
    pub status: String,
    /// Priority in canonical text form.
    pub priority: String,
}

/// Task fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) deadline: Option<DateTime<Utc>>,
    pub(super) status: TaskStatus,
    pub(super) priority: TaskPriority,
}

impl ValidatedTask {
    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the validated status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the validated priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }
}

/// Validates `draft` against the task rules at instant `now`.
///
/// Rules are checked in order and the first failure is returned:
///
/// 1. the trimmed title has at least [`MIN_TITLE_LENGTH`] characters,
/// 2. the deadline, if any, is not before `now`,
/// 3. the status is one of the enumerated values,
/// 4. the priority is one of the enumerated values.
///
/// # Errors
///
/// Returns the [`TaskValidationError`] of the first violated rule.
pub fn validate_draft(
    draft: TaskDraft,
    now: DateTime<Utc>,
) -> Result<ValidatedTask, TaskValidationError> {
    let TaskDraft {
        title,
        description,
        deadline,
        status,
        priority,
    } = draft;

    if title.trim().chars().count() < MIN_TITLE_LENGTH {
        return Err(TaskValidationError::TitleTooShort);
    }

    if deadline.is_some_and(|due| due < now) {
        return Err(TaskValidationError::DeadlineInPast);
    }

    let parsed_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| TaskValidationError::InvalidStatus(err.0))?;
    let parsed_priority = TaskPriority::try_from(priority.as_str())
        .map_err(|err| TaskValidationError::InvalidPriority(err.0))?;

    Ok(ValidatedTask {
        title,
        description,
        deadline,
        status: parsed_status,
        priority: parsed_priority,
    })
}
