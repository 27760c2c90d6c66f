//! Domain model for task lifecycle management.
//!
//! Everything here is pure: title macro extraction, field validation, status
//! resolution, and the listing query engine. Persistence and scheduling live
//! outside the domain boundary.

mod error;
mod ids;
mod macros;
mod query;
mod status;
mod task;
mod validation;

pub use error::{
    ParseTaskIdError, ParseTaskPriorityError, ParseTaskStatusError, TaskValidationError,
};
pub use ids::TaskId;
pub use macros::{TitleMacros, parse_title_macros};
pub use query::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, SortField, SortOrder, TaskFilter, TaskPage, ValidatedFilter,
    query_tasks,
};
pub use status::resolve_status;
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
pub use validation::{MIN_TITLE_LENGTH, TaskDraft, ValidatedTask, validate_draft};
