//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the client. It separates the
//! authoritative task collection from the derived visible list so the two can
//! never drift: every mutation of either the collection or the view parameters
//! goes through [`AppState::refresh_view`].
//!
//! # State Components
//!
//! - **User**: the signed-in user, `None` on the login screen
//! - **Tasks**: the collection as last reported by the server
//! - **Visible**: `compute_view(tasks, view)`, recomputed on every change
//! - **View**: search term, status filter and sort selection
//! - **Draft**: the add-task form, kept across failed submissions
//!
//! # Example
//!
//! ```rust
//! use taskdeck::app::AppState;
//! use taskdeck::domain::Task;
//!
//! let mut state = AppState::new();
//! state.set_tasks(vec![Task::new("1", "Buy milk")]);
//! assert_eq!(state.visible.len(), 1);
//! ```

use super::modes::{AuthMode, Screen};
use crate::domain::{Notification, Task, TaskDraft, TaskId, User};
use crate::ui::viewmodel::{
    DashboardViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, LoginViewModel,
    ToastItem, UIViewModel,
};
use crate::view::{compute_view, TaskStats, ViewParams};

/// Title shown in the dashboard header.
const APP_TITLE: &str = "TodoApp";

/// Central application state container.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Signed-in user. `None` shows the login screen.
    pub user: Option<User>,

    /// Authoritative task collection. Ids are unique.
    pub tasks: Vec<Task>,

    /// Derived visible list. Only [`AppState::refresh_view`] writes it.
    pub visible: Vec<Task>,

    /// Current filter and sort selection.
    pub view: ViewParams,

    /// A task load or authentication call is in flight.
    pub loading: bool,

    /// Login form mode.
    pub auth_mode: AuthMode,

    /// Add-task form contents.
    pub draft: TaskDraft,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        if self.user.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Recomputes the visible list from the collection and view parameters.
    pub fn refresh_view(&mut self) {
        self.visible = compute_view(&self.tasks, &self.view);
    }

    /// Replaces the whole collection.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.refresh_view();
    }

    /// Appends a newly created task.
    ///
    /// A task whose id is already present replaces the old record instead, keeping
    /// ids unique.
    pub fn append_task(&mut self, task: Task) {
        if !self.replace_task(task.clone()) {
            self.tasks.push(task);
            self.refresh_view();
        }
    }

    /// Replaces the task with the same id. Returns `false` if there is none.
    pub fn replace_task(&mut self, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            return false;
        };
        *slot = task;
        self.refresh_view();
        true
    }

    /// Removes the task with `id`. Returns `false` if there is none.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.refresh_view();
        }
        removed
    }

    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Task at 1-based position `number` of the visible list.
    #[must_use]
    pub fn visible_task(&self, number: usize) -> Option<&Task> {
        number.checked_sub(1).and_then(|i| self.visible.get(i))
    }

    /// Drops everything tied to the signed-in user.
    ///
    /// View parameters survive so the next session starts with the same controls.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
        self.draft = TaskDraft::default();
        self.set_tasks(Vec::new());
    }

    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Computes a renderable view model for the active screen.
    ///
    /// # Parameters
    ///
    /// * `toasts` - Notifications currently shown by the tray, oldest first
    #[must_use]
    pub fn compute_viewmodel(&self, toasts: &[Notification]) -> UIViewModel {
        let toasts: Vec<ToastItem> = toasts
            .iter()
            .enumerate()
            .map(|(i, n)| ToastItem {
                number: i + 1,
                kind: n.kind,
                message: n.message.clone(),
            })
            .collect();

        let Some(user) = &self.user else {
            return UIViewModel::Login(LoginViewModel {
                title: self.auth_mode.title().to_string(),
                toggle_hint: self.auth_mode.toggle_hint().to_string(),
                needs_confirmation: self.auth_mode == AuthMode::SignUp,
                busy: self.loading,
                toasts,
            });
        };

        let today = chrono::Local::now().date_naive();
        let display_items: Vec<DisplayItem> = self
            .visible
            .iter()
            .enumerate()
            .map(|(i, task)| DisplayItem::from_task(i + 1, task, today))
            .collect();

        let empty_state = if self.loading {
            Some(EmptyState {
                message: "Loading...".to_string(),
                subtitle: String::new(),
            })
        } else if display_items.is_empty() {
            Some(EmptyState {
                message: "No todos found.".to_string(),
                subtitle: if self.tasks.is_empty() {
                    "Add one with: add <text>".to_string()
                } else {
                    "Nothing matches the current search and filter.".to_string()
                },
            })
        } else {
            None
        };

        UIViewModel::Dashboard(DashboardViewModel {
            header: HeaderInfo {
                title: APP_TITLE.to_string(),
                username: user.username.clone(),
                initial: user.initial(),
            },
            stats: self.stats(),
            filter_summary: self.view.summary(),
            shown: self.visible.len(),
            display_items,
            empty_state,
            toasts,
            footer: FooterInfo {
                keybindings: "add | done n | edit n field=value | rm n | search | filter | sort | dismiss n | logout | quit"
                    .to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;
    use crate::view::{SortKey, SortOrder};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn signed_in() -> AppState {
        let mut state = AppState::new();
        state.user = Some(User::new("ada"));
        state
    }

    fn visible_ids(state: &AppState) -> Vec<&str> {
        state.visible.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn mutations_keep_visible_list_in_sync() {
        let mut state = signed_in();
        state.view.sort_by = SortKey::Text;
        state.view.sort_order = SortOrder::Asc;

        state.set_tasks(vec![Task::new("b", "beta"), Task::new("a", "alpha")]);
        assert_eq!(visible_ids(&state), vec!["a", "b"]);

        state.append_task(Task::new("c", "gamma"));
        assert_eq!(visible_ids(&state), vec!["a", "b", "c"]);

        state.replace_task(Task::new("a", "zeta"));
        assert_eq!(visible_ids(&state), vec!["b", "c", "a"]);

        assert!(state.remove_task(&TaskId::from("b")));
        assert!(!state.remove_task(&TaskId::from("b")));
        assert_eq!(visible_ids(&state), vec!["c", "a"]);
    }

    #[test]
    fn append_with_existing_id_replaces() {
        let mut state = signed_in();
        state.set_tasks(vec![Task::new("a", "alpha")]);
        state.append_task(Task::new("a", "again"));

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "again");
    }

    #[test]
    fn visible_task_is_one_based() {
        let mut state = signed_in();
        state.set_tasks(vec![Task::new("a", "alpha")]);

        assert!(state.visible_task(0).is_none());
        assert_eq!(state.visible_task(1).map(|t| t.id.as_str()), Some("a"));
        assert!(state.visible_task(2).is_none());
    }

    #[test]
    fn sign_out_keeps_view_params() {
        let mut state = signed_in();
        state.view.search_term = "milk".to_string();
        state.set_tasks(vec![Task::new("a", "milk")]);

        state.sign_out();

        assert_eq!(state.screen(), Screen::Login);
        assert!(state.tasks.is_empty());
        assert!(state.visible.is_empty());
        assert_eq!(state.view.search_term, "milk");
    }

    #[test]
    fn login_viewmodel_follows_auth_mode() {
        let mut state = AppState::new();
        state.auth_mode = AuthMode::SignUp;

        let UIViewModel::Login(vm) = state.compute_viewmodel(&[]) else {
            panic!("expected login screen");
        };
        assert_eq!(vm.title, "Create Account");
        assert!(vm.needs_confirmation);
    }

    #[test]
    fn dashboard_viewmodel_numbers_rows_and_toasts() {
        let mut state = signed_in();
        state.set_tasks(vec![Task::new("a", "alpha")]);
        let toast = Notification::new(NotificationKind::Success, "saved", Duration::ZERO);

        let UIViewModel::Dashboard(vm) = state.compute_viewmodel(&[toast]) else {
            panic!("expected dashboard");
        };
        assert_eq!(vm.header.username, "ada");
        assert_eq!(vm.header.initial, Some('A'));
        assert_eq!(vm.display_items[0].number, 1);
        assert_eq!(vm.toasts[0].message, "saved");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn empty_states() {
        let mut state = signed_in();
        state.loading = true;
        let UIViewModel::Dashboard(vm) = state.compute_viewmodel(&[]) else {
            panic!("expected dashboard");
        };
        assert_eq!(vm.empty_state.map(|e| e.message), Some("Loading...".to_string()));

        state.loading = false;
        let UIViewModel::Dashboard(vm) = state.compute_viewmodel(&[]) else {
            panic!("expected dashboard");
        };
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No todos found.".to_string()));
    }
}
