//! Failures of remote API calls.

use thiserror::Error;

/// Toast text for calls that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Why a remote call failed.
///
/// Payloads are plain strings so outcomes can be cloned into application events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        /// The `message` field of the response body, when it had one.
        message: Option<String>,
    },

    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A success response carried a body that could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user for this failure.
    ///
    /// A server-supplied message is surfaced verbatim. Transport failures get the
    /// generic network message; everything else gets `fallback`.
    ///
    /// # Example
    ///
    /// ```
    /// use taskdeck::api::ApiError;
    ///
    /// let rejected = ApiError::Rejected { status: 401, message: None };
    /// assert_eq!(rejected.user_message("Login failed."), "Login failed.");
    /// ```
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Rejected { .. } | Self::Decode(_) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
