//! Data directory resolution.
//!
//! The session file and the log file both live in one per-user directory. The
//! location follows the XDG base directory convention with an explicit override.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TASKDECK_DATA_DIR";

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Returns the data directory for taskdeck storage.
///
/// Resolution order:
///
/// 1. `$TASKDECK_DATA_DIR`
/// 2. `$XDG_DATA_HOME/taskdeck`
/// 3. `$HOME/.local/share/taskdeck`
/// 4. `./.taskdeck`
///
/// Empty variables are skipped.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|key| env::var(key).ok())
}

/// [`get_data_dir`] with an injectable environment lookup.
///
/// # Examples
///
/// ```
/// use taskdeck::infrastructure::resolve_data_dir;
/// use std::path::PathBuf;
///
/// let dir = resolve_data_dir(|key| (key == "HOME").then(|| "/home/ada".to_string()));
/// assert_eq!(dir, PathBuf::from("/home/ada/.local/share/taskdeck"));
/// ```
pub fn resolve_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(dir) = var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = var("XDG_DATA_HOME") {
        return Path::new(&xdg).join("taskdeck");
    }
    if let Some(home) = var("HOME") {
        return Path::new(&home).join(".local/share/taskdeck");
    }
    PathBuf::from(".taskdeck")
}

/// Path of the session file inside `data_dir`.
#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}
