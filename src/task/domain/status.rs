//! Status resolution from completion and deadline.

use super::TaskStatus;
use chrono::{DateTime, Utc};

/// Computes the status of a task at `now`.
///
/// A deadline counts as missed only when it lies strictly before `now`.
///
/// | completed | deadline missed | status      |
/// |-----------|-----------------|-------------|
/// | no        | no              | `ACTIVE`    |
/// | no        | yes             | `OVERDUE`   |
/// | yes       | no              | `COMPLETED` |
/// | yes       | yes             | `LATE`      |
#[must_use]
pub fn resolve_status(
    is_completed: bool,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TaskStatus {
    let deadline_missed = deadline.is_some_and(|due| due < now);
    match (is_completed, deadline_missed) {
        (false, false) => TaskStatus::Active,
        (false, true) => TaskStatus::Overdue,
        (true, false) => TaskStatus::Completed,
        (true, true) => TaskStatus::Late,
    }
}
