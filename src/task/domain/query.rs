//! Filtering, sorting, and pagination over task collections.

use super::{Task, TaskValidationError};
use std::cmp::Ordering;

/// Page number used when a caller does not specify one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Field a task listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Deadline, with tasks lacking a deadline ordered after dated ones.
    Deadline,
    /// Creation timestamp.
    CreatedAt,
    /// Priority rank.
    Priority,
}

impl SortField {
    /// Parses a wire value. The empty string means "no explicit sort".
    fn parse(value: &str) -> Result<Option<Self>, TaskValidationError> {
        match value {
            "" => Ok(None),
            "deadline" => Ok(Some(Self::Deadline)),
            "created_at" => Ok(Some(Self::CreatedAt)),
            "priority" => Ok(Some(Self::Priority)),
            other => Err(TaskValidationError::InvalidSortField(other.to_owned())),
        }
    }

    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::Deadline => match (left.deadline(), right.deadline()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::CreatedAt => left.created_at().cmp(&right.created_at()),
            Self::Priority => left.priority().rank().cmp(&right.priority().rank()),
        }
    }
}

/// Direction applied to a [`SortField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Reversal of the ascending comparator.
    Desc,
}

impl SortOrder {
    /// Parses a wire value case-insensitively. The empty string means
    /// ascending.
    fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value.to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(TaskValidationError::InvalidSortOrder(value.to_owned())),
        }
    }
}

/// Listing parameters as received from a caller.
///
/// Empty strings mean "not set" for every text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status to match, or empty for any.
    pub status: String,
    /// Exact priority to match, or empty for any.
    pub priority: String,
    /// Sort field: empty, `deadline`, `created_at`, or `priority`.
    pub sort_by: String,
    /// Sort order: empty, `asc`, or `desc` in any case.
    pub sort_order: String,
    /// One-based page number.
    pub page: i64,
    /// Maximum number of tasks per page.
    pub page_size: i64,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: String::new(),
            priority: String::new(),
            sort_by: String::new(),
            sort_order: String::new(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TaskFilter {
    /// Creates a filter for the given page with no other constraints.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    /// Restricts results to one status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sorts results by `sort_by` in `sort_order`.
    #[must_use]
    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = sort_order.into();
        self
    }

    /// Checks the filter parameters without touching any tasks.
    ///
    /// Checks run in the order page, page size, sort field, sort order.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskValidationError`] of the first invalid parameter.
    pub fn validate(&self) -> Result<ValidatedFilter<'_>, TaskValidationError> {
        let page = positive(self.page).ok_or(TaskValidationError::InvalidPage(self.page))?;
        let page_size =
            positive(self.page_size).ok_or(TaskValidationError::InvalidPageSize(self.page_size))?;
        let sort_field = SortField::parse(&self.sort_by)?;
        let sort_order = SortOrder::parse(&self.sort_order)?;

        Ok(ValidatedFilter {
            status: self.status.as_str(),
            priority: self.priority.as_str(),
            sort: sort_field.map(|field| (field, sort_order)),
            page,
            page_size,
        })
    }
}

/// Filter parameters that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedFilter<'a> {
    status: &'a str,
    priority: &'a str,
    sort: Option<(SortField, SortOrder)>,
    page: usize,
    page_size: usize,
}

impl ValidatedFilter<'_> {
    /// Filters, sorts, and paginates `tasks`.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> TaskPage {
        let mut matching: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .collect();

        if let Some((field, order)) = self.sort {
            matching.sort_by(|left, right| {
                let ordering = field.compare(left, right);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let total = matching.len();
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        let items = matching.drain(start..end).collect();

        TaskPage {
            items,
            total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    fn matches(&self, task: &Task) -> bool {
        (self.status.is_empty() || task.status().as_str() == self.status)
            && (self.priority.is_empty() || task.priority().as_str() == self.priority)
    }
}

/// One page of a filtered, sorted task listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    items: Vec<Task>,
    total: usize,
    page: usize,
    page_size: usize,
}

impl TaskPage {
    /// Returns the tasks on this page.
    #[must_use]
    pub fn items(&self) -> &[Task] {
        &self.items
    }

    /// Returns the number of tasks that matched the filter before
    /// pagination.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages needed to show every matching task.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }
}

/// Filters, sorts, and paginates `tasks` according to `filter`.
///
/// Filtering keeps tasks whose status and priority equal the requested
/// values; unknown values simply match nothing. Sorting is stable, so tasks
/// with equal keys keep their relative input order in both directions.
///
/// # Errors
///
/// Returns a [`TaskValidationError`] when a filter parameter is invalid.
pub fn query_tasks(tasks: Vec<Task>, filter: &TaskFilter) -> Result<TaskPage, TaskValidationError> {
    Ok(filter.validate()?.apply(tasks))
}

fn positive(value: i64) -> Option<usize> {
    if value < 1 {
        return None;
    }
    Some(usize::try_from(value).unwrap_or(usize::MAX))
}
