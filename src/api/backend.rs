//! Remote API abstraction.
//!
//! The [`RemoteApi`] trait is the seam between the application runtime and the
//! server. [`crate::api::HttpApi`] talks to the real REST endpoints; tests swap in
//! an in-memory implementation.

use crate::api::error::ApiError;
use crate::api::messages::Credentials;
use crate::domain::{NewTask, Task, TaskId, TaskPatch, User};
use async_trait::async_trait;

/// Operations the client needs from the server.
///
/// Each call is independent: nothing here caches or retries.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Exchanges credentials for a user record.
    ///
    /// # Errors
    ///
    /// [`ApiError::Rejected`] for bad credentials, [`ApiError::Transport`] when the
    /// server is unreachable.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, ApiError>;

    /// Creates an account. The response body is ignored.
    ///
    /// # Errors
    ///
    /// [`ApiError::Rejected`] when the server refuses the account.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// Fetches every task belonging to `username`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; callers treat failure as an empty list.
    async fn list_tasks(&self, username: &str) -> Result<Vec<Task>, ApiError>;

    /// Creates a task and returns the stored record with its assigned id.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    async fn create_task(&self, username: &str, task: &NewTask) -> Result<Task, ApiError>;

    /// Applies `patch` and returns the full updated record.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ApiError>;

    /// # Errors
    ///
    /// Any [`ApiError`].
    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError>;
}
