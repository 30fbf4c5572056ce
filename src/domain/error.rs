//! Error types for the taskdeck client.
//!
//! This module defines the centralized error type [`TaskdeckError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Failures coming back
//! from the remote API have their own taxonomy in [`crate::api::ApiError`] and are
//! wrapped here when they need to cross a layer boundary.

use thiserror::Error;

/// The main error type for taskdeck operations.
///
/// None of these are fatal to the client: every failure path ends in a
/// notification and a return to the previous stable state.
///
/// # Examples
///
/// ```
/// use taskdeck::domain::TaskdeckError;
///
/// fn validate_config() -> Result<(), TaskdeckError> {
///     Err(TaskdeckError::Config("api_url must not be empty".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum TaskdeckError {
    /// Reading or writing the session file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote API rejected a request or could not be reached.
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local input failed validation before any network call.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending input field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl TaskdeckError {
    /// Shorthand for a [`TaskdeckError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for taskdeck operations.
pub type Result<T> = std::result::Result<T, TaskdeckError>;
