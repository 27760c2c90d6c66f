//! Error types for task validation and parsing.

use thiserror::Error;

/// Rule violations reported while validating task fields or list queries.
///
/// Exactly one variant is reported per failure: the first violated rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The trimmed title is shorter than the minimum length.
    #[error("title too short")]
    TitleTooShort,

    /// The deadline lies strictly before the validation instant.
    #[error("deadline in past")]
    DeadlineInPast,

    /// The status is not one of the enumerated values.
    #[error("invalid status")]
    InvalidStatus(String),

    /// The priority is not one of the enumerated values.
    #[error("invalid priority")]
    InvalidPriority(String),

    /// The requested page number is below one.
    #[error("page must be greater than 0")]
    InvalidPage(i64),

    /// The requested page size is below one.
    #[error("page_size must be greater than 0")]
    InvalidPageSize(i64),

    /// The sort field is not supported.
    #[error("invalid sort_by field")]
    InvalidSortField(String),

    /// The sort order is neither ascending nor descending.
    #[error("invalid sort_order value")]
    InvalidSortOrder(String),
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a task identifier from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task identifier: {0}")]
pub struct ParseTaskIdError(pub String);
