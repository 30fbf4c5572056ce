//! Signed-in user record.

use serde::{Deserialize, Serialize};

/// The user record returned by the authenticate call.
///
/// The client only reads `username`; every other field the API sends is kept in
/// `extra` so the persisted session round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Upper-cased first character of the username, for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
