//! Notification records published on the [`crate::notify::NotificationBus`].

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Unique notification identifier.
///
/// Random (v4) so that rapid successive calls within one process never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// The closed set of notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
    /// A field-level input problem. Messages are prefixed with the field name.
    Validation,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Validation => "validation",
        }
    }

    /// Whether the message needs the user's immediate attention.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Error | Self::Validation)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transient user-facing message.
///
/// A `ttl` of zero means the notification never expires on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub ttl: Duration,
}

impl Notification {
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
            ttl,
        }
    }

    #[must_use]
    pub fn expires(&self) -> bool {
        !self.ttl.is_zero()
    }
}
