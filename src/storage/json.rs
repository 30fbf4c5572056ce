//! JSON file-based session store.
//!
//! The file holds a small versioned key/value document. Writes go to a temporary
//! file which is then renamed over the target, so a crash never leaves a
//! half-written session behind.

use crate::domain::error::{Result, TaskdeckError};
use crate::domain::User;
use crate::storage::backend::{SessionStore, SESSION_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk document format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values by key.
    #[serde(default)]
    entries: BTreeMap<String, serde_json::Value>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file session store.
///
/// The document is loaded once on creation and kept in memory; every change is
/// written through immediately.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "todoUser": { "username": "ada" }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonSessionStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the document.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonSessionStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store. A file that is not a valid document is
    /// renamed to `<name>.bak` and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(data) => data,
                Err(TaskdeckError::Storage(reason)) => {
                    tracing::warn!(path = ?file_path, %reason, "session file unreadable, starting signed out");
                    Self::set_aside(&file_path);
                    StorageData::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("no session file yet");
            StorageData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Keeps a copy of an unreadable file next to it. Failure only loses the copy.
    fn set_aside(path: &Path) {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        let backup = path.with_file_name(name);
        if let Err(e) = std::fs::rename(path, &backup) {
            tracing::warn!(error = %e, "could not set aside unreadable session file");
        }
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| TaskdeckError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded session data"
        );

        Ok(data)
    }

    /// Writes the document to a temporary file and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the write or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| TaskdeckError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "session saved");
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn load_session(&self) -> Result<Option<User>> {
        let _span = tracing::debug_span!("json_load_session").entered();

        let Some(value) = self.data.entries.get(SESSION_KEY) else {
            return Ok(None);
        };

        match serde_json::from_value::<User>(value.clone()) {
            Ok(user) => {
                tracing::debug!(username = %user.username, "session restored");
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session record");
                Ok(None)
            }
        }
    }

    fn save_session(&mut self, user: &User) -> Result<()> {
        let _span = tracing::debug_span!("json_save_session", username = %user.username).entered();

        let value = serde_json::to_value(user)
            .map_err(|e| TaskdeckError::Storage(format!("failed to encode user: {e}")))?;
        self.data.entries.insert(SESSION_KEY.to_string(), value);

        self.dirty = true;
        self.save_to_file()
    }

    fn clear_session(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_session").entered();

        if self.data.entries.remove(SESSION_KEY).is_none() {
            return Ok(());
        }

        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonSessionStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
