//! HTTP implementation of [`RemoteApi`] over `reqwest`.

use crate::api::backend::RemoteApi;
use crate::api::error::ApiError;
use crate::api::messages::{
    CreateTaskBody, Credentials, DeleteTaskBody, ErrorBody, LoginResponse, UpdateTaskBody,
};
use crate::domain::{NewTask, Task, TaskId, TaskPatch, User};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// REST client for the to-do server.
///
/// Cheap to clone; the underlying connection pool is shared.
///
/// # Examples
///
/// ```no_run
/// use taskdeck::api::{HttpApi, RemoteApi};
///
/// # async fn demo() -> Result<(), taskdeck::api::ApiError> {
/// let api = HttpApi::new("http://localhost:5000");
/// let tasks = api.list_tasks("ada").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses an existing `reqwest` client (custom timeouts, proxies).
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends `request` and returns the response if its status is a success.
    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are best effort; a missing or non-JSON body just means no message.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .unwrap_or_default()
            .message;

        tracing::debug!(status = status.as_u16(), message = ?message, "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let request = self.client.post(self.url("/api/auth/login")).json(credentials);
        let response: LoginResponse = Self::send_json(request).await?;
        Ok(response.user)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/api/users/signup")).json(credentials);
        Self::send(request).await?;
        Ok(())
    }

    async fn list_tasks(&self, username: &str) -> Result<Vec<Task>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/todos"))
            .query(&[("username", username)]);
        Self::send_json(request).await
    }

    async fn create_task(&self, username: &str, task: &NewTask) -> Result<Task, ApiError> {
        let request = self
            .client
            .post(self.url("/api/todos/create"))
            .json(&CreateTaskBody { username, task });
        Self::send_json(request).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let request = self
            .client
            .put(self.url("/api/todos/update"))
            .json(&UpdateTaskBody { id, patch });
        Self::send_json(request).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url("/api/todos/delete"))
            .json(&DeleteTaskBody { id });
        Self::send(request).await?;
        Ok(())
    }
}
