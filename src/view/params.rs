//! View parameters selected by the filter and sort controls.

use crate::domain::error::{Result, TaskdeckError};
use std::fmt;
use std::str::FromStr;

/// Which tasks to keep by completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    #[must_use]
    pub const fn keeps(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Pending => !completed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

/// Field the task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
    Text,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Inputs of [`super::compute_view`] besides the task collection.
///
/// The default (empty search, all tasks, newest first) is the dashboard's initial
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParams {
    pub search_term: String,
    pub filter_status: StatusFilter,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ViewParams {
    /// Human-readable one-line summary, e.g. `pending, priority desc, "milk"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}, {} {}",
            self.filter_status, self.sort_by, self.sort_order
        );
        if !self.search_term.is_empty() {
            summary.push_str(&format!(", \"{}\"", self.search_term));
        }
        summary
    }
}

macro_rules! display_and_parse {
    ($ty:ident, $field:literal, { $($text:literal => $variant:ident),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TaskdeckError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TaskdeckError::validation(
                        $field,
                        format!("unknown value '{other}'"),
                    )),
                }
            }
        }
    };
}

display_and_parse!(StatusFilter, "filter", {
    "all" => All,
    "completed" => Completed,
    "pending" => Pending,
});

display_and_parse!(SortKey, "sort", {
    "createdat" => CreatedAt,
    "created" => CreatedAt,
    "duedate" => DueDate,
    "due" => DueDate,
    "priority" => Priority,
    "text" => Text,
});

display_and_parse!(SortOrder, "order", {
    "asc" => Asc,
    "desc" => Desc,
});
