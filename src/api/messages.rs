//! Requests the application issues to the server and the outcomes it receives.
//!
//! The application handler never awaits anything. It emits [`ApiRequest`] values
//! as actions; the runtime executes them against a [`RemoteApi`] and feeds the
//! matching [`ApiOutcome`] back in as an event.

use crate::api::backend::RemoteApi;
use crate::api::error::ApiError;
use crate::domain::{NewTask, Task, TaskId, TaskPatch, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::Instrument;

/// Username and password, forwarded to the server untouched.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Generates constructors for [`ApiRequest`] variants.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant { $($field,)* }
                }
            )*
        }
    };
}

api_request_builders! {
    authenticate(Authenticate { credentials: Credentials }),
    register(Register { credentials: Credentials }),
    list_tasks(ListTasks { username: String }),
    create_task(CreateTask { username: String, task: NewTask }),
    update_task(UpdateTask { id: TaskId, patch: TaskPatch }),
    delete_task(DeleteTask { id: TaskId }),
}

/// A remote call the application wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Authenticate {
        credentials: Credentials,
    },
    Register {
        credentials: Credentials,
    },
    ListTasks {
        username: String,
    },
    CreateTask {
        username: String,
        task: NewTask,
    },
    UpdateTask {
        id: TaskId,
        patch: TaskPatch,
    },
    DeleteTask {
        id: TaskId,
    },
}

/// Result of an [`ApiRequest`], tagged with enough context to apply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Authenticated(Result<User, ApiError>),
    Registered(Result<(), ApiError>),
    TasksLoaded(Result<Vec<Task>, ApiError>),
    TaskCreated(Result<Task, ApiError>),
    TaskUpdated {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    TaskDeleted {
        id: TaskId,
        result: Result<(), ApiError>,
    },
}

impl ApiRequest {
    /// Short operation name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Authenticate { .. } => "authenticate",
            Self::Register { .. } => "register",
            Self::ListTasks { .. } => "list_tasks",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
        }
    }

    /// Performs the request against `api`.
    ///
    /// Never fails: errors are carried inside the returned outcome.
    pub async fn execute(self, api: &dyn RemoteApi) -> ApiOutcome {
        let span = tracing::debug_span!("api_request", operation = self.name());

        async move {
            let outcome = match self {
                Self::Authenticate { credentials } => {
                    ApiOutcome::Authenticated(api.authenticate(&credentials).await)
                }
                Self::Register { credentials } => {
                    ApiOutcome::Registered(api.register(&credentials).await)
                }
                Self::ListTasks { username } => {
                    ApiOutcome::TasksLoaded(api.list_tasks(&username).await)
                }
                Self::CreateTask { username, task } => {
                    ApiOutcome::TaskCreated(api.create_task(&username, &task).await)
                }
                Self::UpdateTask { id, patch } => {
                    let result = api.update_task(&id, &patch).await;
                    ApiOutcome::TaskUpdated { id, result }
                }
                Self::DeleteTask { id } => {
                    let result = api.delete_task(&id).await;
                    ApiOutcome::TaskDeleted { id, result }
                }
            };

            match outcome.error() {
                Some(err) => tracing::warn!(error = %err, "request failed"),
                None => tracing::debug!("request succeeded"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

impl ApiOutcome {
    /// The failure carried by this outcome, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Authenticated(r) => r.as_ref().err(),
            Self::Registered(r) => r.as_ref().err(),
            Self::TasksLoaded(r) => r.as_ref().err(),
            Self::TaskCreated(r) => r.as_ref().err(),
            Self::TaskUpdated { result, .. } => result.as_ref().err(),
            Self::TaskDeleted { result, .. } => result.as_ref().err(),
        }
    }
}

/// Body of `POST /api/todos/create`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateTaskBody<'a> {
    pub username: &'a str,
    #[serde(flatten)]
    pub task: &'a NewTask,
}

/// Body of `PUT /api/todos/update`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateTaskBody<'a> {
    pub id: &'a TaskId,
    #[serde(flatten)]
    pub patch: &'a TaskPatch,
}

/// Body of `DELETE /api/todos/delete`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteTaskBody<'a> {
    pub id: &'a TaskId,
}

/// Success body of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub user: User,
}

/// Shape of error bodies; only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
