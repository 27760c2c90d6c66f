//! Title macro parser.
//!
//! Titles may embed short directives that carry metadata instead of text:
//!
//! - `!1`, `!2`, `!3`, `!4` set the priority to `CRITICAL`, `HIGH`, `MEDIUM`
//!   and `LOW` respectively.
//! - `!before DD.MM.YYYY` (or `DD-MM-YYYY`) sets the deadline to midnight UTC
//!   of that date.
//!
//! Recognised directives are removed from the title and the remainder is
//! trimmed.

use super::TaskPriority;
use chrono::{DateTime, NaiveDate, Utc};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Priority directives in scan order. The first token present wins.
const PRIORITY_MACROS: [(&str, TaskPriority); 4] = [
    ("!1", TaskPriority::Critical),
    ("!2", TaskPriority::High),
    ("!3", TaskPriority::Medium),
    ("!4", TaskPriority::Low),
];

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by unit tests"
)]
static DEADLINE_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!before\s+([0-9]{2})([.-])([0-9]{2})([.-])([0-9]{4})")
        .expect("deadline macro pattern must compile")
});

/// Result of extracting macros from a raw title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMacros {
    title: String,
    priority: Option<TaskPriority>,
    deadline: Option<DateTime<Utc>>,
}

impl TitleMacros {
    /// Returns the title with recognised directives removed and trimmed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the extracted priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the extracted deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Splits the result into its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<TaskPriority>, Option<DateTime<Utc>>) {
        (self.title, self.priority, self.deadline)
    }
}

/// Extracts priority and deadline directives from `raw`.
///
/// At most one priority token is honoured: tokens are tried in the order
/// `!1`, `!2`, `!3`, `!4`, and only the first occurrence of the first token
/// found is removed.
///
/// A token directly followed by another digit (`!12`) is deliberately not
/// treated as a directive, even though it contains the literal `!1`, so
/// numbered references such as `issue !12` survive intact.
///
/// Only the leftmost `!before` directive is considered. When its date is not
/// a valid calendar date the directive stays in the title and no deadline is
/// set.
#[must_use]
pub fn parse_title_macros(raw: &str) -> TitleMacros {
    let mut title = raw.to_owned();

    let priority = PRIORITY_MACROS.iter().find_map(|(token, priority)| {
        let start = find_priority_token(&title, token)?;
        title.replace_range(start..start + token.len(), "");
        Some(*priority)
    });

    let mut deadline = None;
    let matched = DEADLINE_MACRO
        .captures(&title)
        .and_then(|captures| Some((captures.get(0)?.range(), parse_deadline(&captures)?)));
    if let Some((range, parsed)) = matched {
        title.replace_range(range, "");
        deadline = Some(parsed);
    }

    TitleMacros {
        title: title.trim().to_owned(),
        priority,
        deadline,
    }
}

fn find_priority_token(title: &str, token: &str) -> Option<usize> {
    title.match_indices(token).map(|(start, _)| start).find(|start| {
        title
            .get(start + token.len()..)
            .and_then(|rest| rest.chars().next())
            .is_none_or(|next| !next.is_ascii_digit())
    })
}

fn parse_deadline(captures: &Captures<'_>) -> Option<DateTime<Utc>> {
    let group = |index: usize| captures.get(index).map(|found| found.as_str());
    if group(2)? != group(4)? {
        return None;
    }
    let day = group(1)?.parse::<u32>().ok()?;
    let month = group(3)?.parse::<u32>().ok()?;
    let year = group(5)?.parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
}
