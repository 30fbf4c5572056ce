//! Event handling and state transition logic.
//!
//! [`handle_event`] turns user intents and remote call outcomes into state
//! changes, notifications and side-effect [`Action`]s. It never awaits: remote
//! calls are requested with [`Action::Call`] and their results come back later as
//! [`Event::ApiCompleted`].
//!
//! ```text
//! User Input → Event → handle_event → State Mutations → Actions → Runtime
//!                           ↑                                        ↓
//!                           └──────────── ApiCompleted ──────────────┘
//! ```
//!
//! # Event Types
//!
//! - **Session**: `Restore`, `SubmitLogin`, `SubmitSignup`, `ToggleAuthMode`, `Logout`
//! - **Tasks**: `SubmitDraft`, `ToggleComplete`, `EditTask`, `DeleteTask`
//! - **View**: `SetSearch`, `SetStatusFilter`, `SetSort`
//! - **Remote**: `ApiCompleted` with the typed outcome

use crate::api::{ApiOutcome, ApiRequest, Credentials};
use crate::app::modes::AuthMode;
use crate::app::{Action, AppState};
use crate::domain::error::{Result, TaskdeckError};
use crate::domain::{Task, TaskDraft, TaskId, TaskPatch, User};
use crate::notify::NotificationBus;
use crate::view::{SortKey, SortOrder, StatusFilter};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_PASSWORDS_DIFFER: &str = "Passwords do not match.";
pub const MSG_LOGIN_OK: &str = "Login successful!";
pub const MSG_LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const MSG_SIGNUP_OK: &str = "Signup successful! Please log in.";
pub const MSG_SIGNUP_FAILED: &str = "Signup failed.";
pub const MSG_ADD_OK: &str = "Todo added successfully!";
pub const MSG_ADD_FAILED: &str = "Failed to add todo.";
pub const MSG_UPDATE_OK: &str = "Todo updated successfully!";
pub const MSG_UPDATE_FAILED: &str = "Failed to update todo.";
pub const MSG_DELETE_OK: &str = "Todo deleted successfully!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete todo.";
pub const MSG_EMPTY_TEXT: &str = "Please enter a todo item.";

/// Events triggered by user input or remote call completion.
///
/// Processed one at a time, so state transitions are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A persisted session was found at startup.
    Restore(User),

    /// The login form was submitted in sign-in mode.
    SubmitLogin(Credentials),

    /// The login form was submitted in sign-up mode.
    SubmitSignup {
        credentials: Credentials,
        confirm_password: String,
    },

    /// Switches the login form between sign-in and sign-up.
    ToggleAuthMode,

    Logout,

    /// The add-task form was submitted.
    SubmitDraft(TaskDraft),

    /// Flips the completion flag of a task.
    ToggleComplete(TaskId),

    /// Applies a partial update to a task.
    EditTask { id: TaskId, patch: TaskPatch },

    DeleteTask(TaskId),

    SetSearch(String),

    SetStatusFilter(StatusFilter),

    SetSort { key: SortKey, order: SortOrder },

    /// A remote call finished.
    ApiCompleted(ApiOutcome),
}

impl Event {
    /// Variant name for logs. Never includes payloads, which may hold passwords.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Restore(_) => "restore",
            Self::SubmitLogin(_) => "submit_login",
            Self::SubmitSignup { .. } => "submit_signup",
            Self::ToggleAuthMode => "toggle_auth_mode",
            Self::Logout => "logout",
            Self::SubmitDraft(_) => "submit_draft",
            Self::ToggleComplete(_) => "toggle_complete",
            Self::EditTask { .. } => "edit_task",
            Self::DeleteTask(_) => "delete_task",
            Self::SetSearch(_) => "set_search",
            Self::SetStatusFilter(_) => "set_status_filter",
            Self::SetSort { .. } => "set_sort",
            Self::ApiCompleted(_) => "api_completed",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `bus` - Notification bus user-facing feedback is published on
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the screen must be redrawn, and the actions to execute in order.
///
/// # Errors
///
/// Propagates unexpected failures from draft conversion. User mistakes are
/// reported through the bus instead and are not errors.
///
/// # Example
///
/// ```rust
/// use taskdeck::app::{handle_event, AppState, Event};
/// use taskdeck::notify::{NotificationBus, NotificationDurations};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> taskdeck::domain::Result<()> {
/// let bus = NotificationBus::new(NotificationDurations::default());
/// let mut state = AppState::new();
/// let (render, actions) = handle_event(&mut state, &bus, &Event::ToggleAuthMode)?;
/// assert!(render);
/// assert!(actions.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn handle_event(
    state: &mut AppState,
    bus: &NotificationBus,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Restore(user) => {
            tracing::info!(username = %user.username, "restoring session");
            state.user = Some(user.clone());
            state.loading = true;
            Ok((true, vec![load_tasks(&user.username)]))
        }

        Event::SubmitLogin(credentials) => {
            if credentials.username.is_empty() || credentials.password.is_empty() {
                bus.error(MSG_FILL_ALL_FIELDS);
                return Ok((true, vec![]));
            }
            state.loading = true;
            Ok((
                true,
                vec![Action::Call(ApiRequest::authenticate(credentials.clone()))],
            ))
        }

        Event::SubmitSignup {
            credentials,
            confirm_password,
        } => {
            if credentials.username.is_empty()
                || credentials.password.is_empty()
                || confirm_password.is_empty()
            {
                bus.error(MSG_FILL_ALL_FIELDS);
                return Ok((true, vec![]));
            }
            if &credentials.password != confirm_password {
                bus.error(MSG_PASSWORDS_DIFFER);
                return Ok((true, vec![]));
            }
            state.loading = true;
            Ok((
                true,
                vec![Action::Call(ApiRequest::register(credentials.clone()))],
            ))
        }

        Event::ToggleAuthMode => {
            state.auth_mode = state.auth_mode.toggled();
            Ok((true, vec![]))
        }

        Event::Logout => {
            tracing::info!(username = ?state.username(), "signing out");
            state.sign_out();
            Ok((true, vec![Action::ClearSession]))
        }

        Event::SubmitDraft(draft) => {
            let Some(username) = state.username().map(str::to_string) else {
                tracing::warn!("draft submitted while signed out");
                return Ok((false, vec![]));
            };
            state.draft = draft.clone();

            match draft.validate() {
                Ok(task) => Ok((
                    true,
                    vec![Action::Call(ApiRequest::create_task(username, task))],
                )),
                Err(TaskdeckError::Validation { message, .. }) => {
                    bus.error(message);
                    Ok((true, vec![]))
                }
                Err(e) => Err(e),
            }
        }

        Event::ToggleComplete(id) => {
            let Some(task) = state.find_task(id) else {
                tracing::warn!(task_id = %id, "toggle for unknown task");
                return Ok((false, vec![]));
            };
            let patch = TaskPatch::toggle(task);
            Ok((
                false,
                vec![Action::Call(ApiRequest::update_task(id.clone(), patch))],
            ))
        }

        Event::EditTask { id, patch } => {
            if patch.is_empty() {
                tracing::debug!(task_id = %id, "empty patch ignored");
                return Ok((false, vec![]));
            }
            if state.find_task(id).is_none() {
                tracing::warn!(task_id = %id, "edit for unknown task");
                return Ok((false, vec![]));
            }
            if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                bus.error(MSG_EMPTY_TEXT);
                return Ok((true, vec![]));
            }
            Ok((
                false,
                vec![Action::Call(ApiRequest::update_task(
                    id.clone(),
                    patch.clone(),
                ))],
            ))
        }

        Event::DeleteTask(id) => {
            if state.find_task(id).is_none() {
                tracing::warn!(task_id = %id, "delete for unknown task");
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::Call(ApiRequest::delete_task(id.clone()))],
            ))
        }

        Event::SetSearch(term) => {
            state.view.search_term.clone_from(term);
            state.refresh_view();
            Ok((true, vec![]))
        }

        Event::SetStatusFilter(status) => {
            state.view.filter_status = *status;
            state.refresh_view();
            Ok((true, vec![]))
        }

        Event::SetSort { key, order } => {
            state.view.sort_by = *key;
            state.view.sort_order = *order;
            state.refresh_view();
            Ok((true, vec![]))
        }

        Event::ApiCompleted(outcome) => Ok(handle_outcome(state, bus, outcome)),
    }
}

fn load_tasks(username: &str) -> Action {
    Action::Call(ApiRequest::list_tasks(username.to_string()))
}

/// Applies the result of a remote call.
fn handle_outcome(
    state: &mut AppState,
    bus: &NotificationBus,
    outcome: &ApiOutcome,
) -> (bool, Vec<Action>) {
    match outcome {
        ApiOutcome::Authenticated(Ok(user)) => {
            bus.success(MSG_LOGIN_OK);
            state.user = Some(user.clone());
            state.loading = true;
            (
                true,
                vec![
                    Action::PersistSession(user.clone()),
                    load_tasks(&user.username),
                ],
            )
        }
        ApiOutcome::Authenticated(Err(e)) => {
            state.loading = false;
            bus.error(e.user_message(MSG_LOGIN_FAILED));
            (true, vec![])
        }

        ApiOutcome::Registered(Ok(())) => {
            state.loading = false;
            state.auth_mode = AuthMode::SignIn;
            bus.success(MSG_SIGNUP_OK);
            (true, vec![])
        }
        ApiOutcome::Registered(Err(e)) => {
            state.loading = false;
            bus.error(e.user_message(MSG_SIGNUP_FAILED));
            (true, vec![])
        }

        // Task outcomes that land after sign-out belong to the previous session.
        _ if state.user.is_none() => {
            tracing::debug!("dropping task outcome received while signed out");
            (false, vec![])
        }

        ApiOutcome::TasksLoaded(result) => {
            state.loading = false;
            let tasks: Vec<Task> = match result {
                Ok(tasks) => tasks.clone(),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load tasks");
                    Vec::new()
                }
            };
            tracing::debug!(count = tasks.len(), "tasks loaded");
            state.set_tasks(tasks);
            (true, vec![])
        }

        ApiOutcome::TaskCreated(Ok(task)) => {
            state.append_task(task.clone());
            state.draft = TaskDraft::default();
            bus.success(MSG_ADD_OK);
            (true, vec![])
        }
        ApiOutcome::TaskCreated(Err(e)) => {
            bus.error(e.user_message(MSG_ADD_FAILED));
            (true, vec![])
        }

        ApiOutcome::TaskUpdated { id, result: Ok(task) } => {
            if task.id != *id {
                tracing::warn!(requested = %id, returned = %task.id, "update returned a different id");
            }
            if !state.replace_task(task.clone()) {
                tracing::warn!(task_id = %task.id, "updated task no longer present");
            }
            bus.success(MSG_UPDATE_OK);
            (true, vec![])
        }
        ApiOutcome::TaskUpdated { result: Err(e), .. } => {
            bus.error(e.user_message(MSG_UPDATE_FAILED));
            (true, vec![])
        }

        ApiOutcome::TaskDeleted { id, result: Ok(()) } => {
            state.remove_task(id);
            bus.success(MSG_DELETE_OK);
            (true, vec![])
        }
        ApiOutcome::TaskDeleted { result: Err(e), .. } => {
            bus.error(e.user_message(MSG_DELETE_FAILED));
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, NETWORK_ERROR_MESSAGE};
    use crate::domain::NotificationKind;
    use crate::notify::NotificationDurations;
    use pretty_assertions::assert_eq;

    fn bus() -> NotificationBus {
        NotificationBus::new(NotificationDurations::default())
    }

    fn signed_in(tasks: Vec<Task>) -> AppState {
        let mut state = AppState::new();
        state.user = Some(User::new("ada"));
        state.set_tasks(tasks);
        state
    }

    fn messages(bus: &NotificationBus) -> Vec<(NotificationKind, String)> {
        bus.live().into_iter().map(|n| (n.kind, n.message)).collect()
    }

    #[tokio::test]
    async fn login_with_blank_field_never_calls_api() {
        let bus = bus();
        let mut state = AppState::new();

        let (_, actions) = handle_event(
            &mut state,
            &bus,
            &Event::SubmitLogin(Credentials::new("ada", "")),
        )
        .unwrap();

        assert!(actions.is_empty());
        assert_eq!(
            messages(&bus),
            vec![(NotificationKind::Error, MSG_FILL_ALL_FIELDS.to_string())]
        );
    }

    #[tokio::test]
    async fn signup_with_mismatched_passwords_is_rejected_locally() {
        let bus = bus();
        let mut state = AppState::new();

        let (_, actions) = handle_event(
            &mut state,
            &bus,
            &Event::SubmitSignup {
                credentials: Credentials::new("ada", "one"),
                confirm_password: "two".to_string(),
            },
        )
        .unwrap();

        assert!(actions.is_empty());
        assert_eq!(messages(&bus)[0].1, MSG_PASSWORDS_DIFFER);
    }

    #[tokio::test]
    async fn successful_login_persists_and_loads() {
        let bus = bus();
        let mut state = AppState::new();
        let user = User::new("ada");

        let (_, actions) = handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::Authenticated(Ok(user.clone()))),
        )
        .unwrap();

        assert_eq!(
            actions,
            vec![
                Action::PersistSession(user),
                Action::Call(ApiRequest::list_tasks("ada".to_string())),
            ]
        );
        assert!(state.loading);
        assert_eq!(messages(&bus)[0].1, MSG_LOGIN_OK);
    }

    #[tokio::test]
    async fn rejected_login_surfaces_server_message() {
        let bus = bus();
        let mut state = AppState::new();
        let err = ApiError::Rejected {
            status: 401,
            message: Some("Invalid password".to_string()),
        };

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::Authenticated(Err(err))),
        )
        .unwrap();

        assert!(state.user.is_none());
        assert_eq!(messages(&bus)[0].1, "Invalid password");
    }

    #[tokio::test]
    async fn signup_success_switches_to_sign_in() {
        let bus = bus();
        let mut state = AppState::new();
        state.auth_mode = AuthMode::SignUp;

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::Registered(Ok(()))),
        )
        .unwrap();

        assert_eq!(state.auth_mode, AuthMode::SignIn);
        assert_eq!(messages(&bus)[0].1, MSG_SIGNUP_OK);
    }

    #[tokio::test]
    async fn failed_load_empties_list_without_toast() {
        let bus = bus();
        let mut state = signed_in(vec![Task::new("a", "stale")]);
        state.loading = true;

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TasksLoaded(Err(ApiError::Transport(
                "refused".to_string(),
            )))),
        )
        .unwrap();

        assert!(state.tasks.is_empty());
        assert!(!state.loading);
        assert!(bus.live().is_empty());
    }

    #[tokio::test]
    async fn blank_draft_is_kept_and_reported() {
        let bus = bus();
        let mut state = signed_in(vec![]);
        let draft = TaskDraft::new("   ");

        let (_, actions) =
            handle_event(&mut state, &bus, &Event::SubmitDraft(draft.clone())).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.draft, draft);
        assert_eq!(messages(&bus)[0].1, "Please enter a todo item.");
    }

    #[tokio::test]
    async fn failed_create_keeps_draft() {
        let bus = bus();
        let mut state = signed_in(vec![]);
        let draft = TaskDraft::new("Buy milk");

        let (_, actions) =
            handle_event(&mut state, &bus, &Event::SubmitDraft(draft.clone())).unwrap();
        assert_eq!(actions.len(), 1);

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TaskCreated(Err(ApiError::Transport(
                "refused".to_string(),
            )))),
        )
        .unwrap();

        assert_eq!(state.draft, draft);
        assert_eq!(messages(&bus)[0].1, NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn created_task_is_appended_and_draft_cleared() {
        let bus = bus();
        let mut state = signed_in(vec![]);
        state.draft = TaskDraft::new("Buy milk");

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TaskCreated(Ok(Task::new("t1", "Buy milk")))),
        )
        .unwrap();

        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.draft, TaskDraft::default());
        assert_eq!(messages(&bus)[0], (NotificationKind::Success, MSG_ADD_OK.to_string()));
    }

    #[tokio::test]
    async fn toggle_requests_inverted_flag() {
        let bus = bus();
        let mut state = signed_in(vec![Task::new("t1", "Buy milk")]);
        let id = TaskId::from("t1");

        let (_, actions) =
            handle_event(&mut state, &bus, &Event::ToggleComplete(id.clone())).unwrap();

        assert_eq!(
            actions,
            vec![Action::Call(ApiRequest::update_task(
                id,
                TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                }
            ))]
        );
    }

    #[tokio::test]
    async fn updated_task_replaces_by_id() {
        let bus = bus();
        let mut state = signed_in(vec![Task::new("t1", "Buy milk")]);
        let mut updated = state.tasks[0].clone();
        updated.completed = true;

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TaskUpdated {
                id: TaskId::from("t1"),
                result: Ok(updated),
            }),
        )
        .unwrap();

        assert!(state.tasks[0].completed);
        assert_eq!(messages(&bus)[0].1, MSG_UPDATE_OK);
    }

    #[tokio::test]
    async fn failed_delete_keeps_task() {
        let bus = bus();
        let mut state = signed_in(vec![Task::new("t1", "Buy milk")]);

        handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TaskDeleted {
                id: TaskId::from("t1"),
                result: Err(ApiError::Rejected {
                    status: 500,
                    message: None,
                }),
            }),
        )
        .unwrap();

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(messages(&bus)[0].1, MSG_DELETE_FAILED);
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let bus = bus();
        let mut state = signed_in(vec![Task::new("t1", "Buy milk")]);

        let (_, actions) = handle_event(&mut state, &bus, &Event::Logout).unwrap();

        assert_eq!(actions, vec![Action::ClearSession]);
        assert!(state.user.is_none());
        assert!(state.tasks.is_empty());
    }

    #[tokio::test]
    async fn view_events_recompute_visible_list() {
        let bus = bus();
        let mut done = Task::new("a", "alpha");
        done.completed = true;
        let mut state = signed_in(vec![done, Task::new("b", "beta")]);

        handle_event(
            &mut state,
            &bus,
            &Event::SetStatusFilter(StatusFilter::Pending),
        )
        .unwrap();
        assert_eq!(state.visible.len(), 1);

        handle_event(&mut state, &bus, &Event::SetSearch("alp".to_string())).unwrap();
        assert!(state.visible.is_empty());
    }

    #[tokio::test]
    async fn outcome_after_logout_is_ignored() {
        let bus = bus();
        let mut state = AppState::new();

        let (render, _) = handle_event(
            &mut state,
            &bus,
            &Event::ApiCompleted(ApiOutcome::TasksLoaded(Ok(vec![Task::new("a", "alpha")]))),
        )
        .unwrap();

        assert!(!render);
        assert!(state.tasks.is_empty());
    }
}
