//! Task domain model and form inputs.
//!
//! [`Task`] is the record the remote API hands back. The API owns its lifecycle, so
//! deserialization is lenient: optional fields that arrive malformed degrade to
//! "absent" instead of failing the whole payload. [`TaskDraft`] and [`TaskPatch`]
//! model the add and edit forms.

use crate::domain::error::{Result, TaskdeckError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque task identifier assigned by the remote API.
///
/// The wire form may be a string or a number; numbers are kept in their decimal
/// string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort ordinal: high=3, medium=2, low=1. Absent priority ranks 0 at the call site.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TaskdeckError::validation(
                "priority",
                format!("unknown priority '{other}' (expected low, medium or high)"),
            )),
        }
    }
}

/// One to-do item as stored by the remote API.
///
/// # Fields
///
/// - `id`: assigned by the API, immutable
/// - `text`: display text, required
/// - `completed`: completion flag, defaults to `false`
/// - `due_date`: optional due date; `YYYY-MM-DD` or RFC 3339 on the wire
/// - `priority`: `None` when the API sent nothing or an unknown level
/// - `notes`: optional free text
/// - `tags`: display-ordered labels
/// - `created_at`: creation timestamp, `None` when missing or malformed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a medium-priority task stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: TaskId(id.into()),
            text: text.into(),
            completed: false,
            due_date: None,
            priority: Some(Priority::Medium),
            notes: None,
            tags: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    /// Priority for display, falling back to medium.
    #[must_use]
    pub fn display_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse_date))
}

fn lenient_priority<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Priority>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

/// Parses a due date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Splits a comma-separated tag string, trimming entries and dropping empty ones.
///
/// # Examples
///
/// ```
/// use taskdeck::domain::parse_tags;
///
/// assert_eq!(parse_tags(" work, urgent,, "), vec!["work", "urgent"]);
/// assert!(parse_tags("").is_empty());
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Contents of the add-task form.
///
/// Kept in application state so a failed submission does not lose what the user
/// typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub notes: String,
    /// Raw comma-separated tag input.
    pub tags: String,
}

impl TaskDraft {
    /// Creates a draft holding only `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Validates the draft and converts it into a creation payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Validation`] when the trimmed text is empty.
    pub fn validate(&self) -> Result<NewTask> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(TaskdeckError::validation("text", "Please enter a todo item."));
        }

        Ok(NewTask {
            text: text.to_string(),
            due_date: self.due_date,
            priority: self.priority,
            notes: self.notes.trim().to_string(),
            tags: parse_tags(&self.tags),
        })
    }
}

/// Validated fields for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub notes: String,
    pub tags: Vec<String>,
}

/// Partial update sent with an update request. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// `Some(None)` clears the due date and is sent as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Patch flipping the completion flag of `task`.
    #[must_use]
    pub fn toggle(task: &Task) -> Self {
        Self {
            completed: Some(!task.completed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_full_record() {
        let json = r#"{
            "id": "t1",
            "text": "Buy milk",
            "completed": true,
            "dueDate": "2025-01-01",
            "priority": "high",
            "notes": "2%",
            "tags": ["errand"],
            "createdAt": "2024-12-30T10:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, TaskId::from("t1"));
        assert!(task.completed);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.tags, vec!["errand".to_string()]);
        assert!(task.created_at.is_some());
    }

    #[test]
    fn malformed_optional_fields_degrade_to_absent() {
        let json = r#"{
            "id": 42,
            "text": "Write report",
            "dueDate": "someday",
            "priority": "urgent",
            "tags": null,
            "createdAt": "yesterday"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "42");
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, None);
        assert!(task.tags.is_empty());
        assert_eq!(task.created_at, None);
        assert_eq!(task.display_priority(), Priority::Medium);
    }

    #[test]
    fn due_date_accepts_rfc3339() {
        assert_eq!(
            parse_date("2025-03-04T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn draft_validation_trims_and_parses_tags() {
        let draft = TaskDraft {
            text: "  Ship release ".to_string(),
            notes: " soon ".to_string(),
            tags: "work, , release".to_string(),
            ..TaskDraft::default()
        };

        let new_task = draft.validate().unwrap();
        assert_eq!(new_task.text, "Ship release");
        assert_eq!(new_task.notes, "soon");
        assert_eq!(new_task.tags, vec!["work".to_string(), "release".to_string()]);
        assert_eq!(new_task.priority, Priority::Medium);
    }

    #[test]
    fn draft_with_blank_text_is_rejected() {
        let err = TaskDraft::new("   ").validate().unwrap_err();
        assert!(matches!(err, TaskdeckError::Validation { ref field, .. } if field == "text"));
    }

    #[test]
    fn patch_omits_unset_fields() {
        let task = Task::new("t1", "Buy milk");
        let body = serde_json::to_value(TaskPatch::toggle(&task)).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn patch_can_clear_due_date() {
        let patch = TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "dueDate": null })
        );
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("critical".parse::<Priority>().is_err());
    }
}
