//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use taskdeck::ui::viewmodel::{LoginViewModel, UIViewModel};
//!
//! let vm = UIViewModel::Login(LoginViewModel {
//!     title: "Welcome Back".to_string(),
//!     toggle_hint: "Don't have an account? Sign up".to_string(),
//!     needs_confirmation: false,
//!     busy: false,
//!     toasts: vec![],
//! });
//! ```

use crate::domain::{NotificationKind, Priority, Task};
use crate::view::TaskStats;
use chrono::NaiveDate;

/// Complete view model for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UIViewModel {
    Login(LoginViewModel),
    Dashboard(DashboardViewModel),
}

/// Login or signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginViewModel {
    /// "Welcome Back" or "Create Account".
    pub title: String,

    /// Prompt for switching to the other form.
    pub toggle_hint: String,

    /// Whether the form asks for a password confirmation.
    pub needs_confirmation: bool,

    /// A request is in flight.
    pub busy: bool,

    pub toasts: Vec<ToastItem>,
}

/// Signed-in dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub header: HeaderInfo,

    /// Counts over the whole collection.
    pub stats: TaskStats,

    /// One-line description of the active search, filter and sort.
    pub filter_summary: String,

    /// Number of tasks passing the current search and filter.
    pub shown: usize,

    /// Rows in display order.
    pub display_items: Vec<DisplayItem>,

    /// Shown instead of the table when there are no rows.
    pub empty_state: Option<EmptyState>,

    pub toasts: Vec<ToastItem>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub username: String,
    /// Avatar letter.
    pub initial: Option<char>,
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based row number used by row commands.
    pub number: usize,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    /// Due date formatted for display.
    pub due_date: Option<String>,
    /// Pending and due before today.
    pub overdue: bool,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl DisplayItem {
    /// Builds the row for `task` at 1-based position `number`.
    #[must_use]
    pub fn from_task(number: usize, task: &Task, today: NaiveDate) -> Self {
        Self {
            number,
            text: task.text.clone(),
            completed: task.completed,
            priority: task.display_priority(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            overdue: !task.completed && task.due_date.is_some_and(|d| d < today),
            tags: task.tags.clone(),
            notes: task
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No todos found.").
    pub message: String,

    /// Secondary explanatory text, may be empty.
    pub subtitle: String,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    /// 1-based position used by the dismiss command.
    pub number: usize,
    pub kind: NotificationKind,
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}
