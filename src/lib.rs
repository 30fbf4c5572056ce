//! Taskdeck: a terminal to-do client with typed notifications and a derived task view.
//!
//! Taskdeck talks to a remote to-do API and provides:
//! - Sign-in and sign-up with a session that survives restarts
//! - Task creation, completion toggling, editing and deletion
//! - Search, status filtering and stable multi-key sorting over the task list
//! - A notification bus whose messages expire on their own after a per-kind delay

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command loop (main.rs, cli.rs)                     │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action execution                                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ API Layer     │
//! │ (ui/)         │   │ (storage/)    │   │ (api/)        │
//! │ - Rendering   │   │ - JSON I/O    │   │ - HTTP client │
//! │ - Components  │   │ - Session     │   │ - Requests    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Notify, View & Domain Layers                       │
//! │  - Notification bus and tray (notify/)              │
//! │  - Filter/sort engine and stats (view/)             │
//! │  - Task, user and error types (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Remote API seam and its HTTP implementation
//! - [`domain`]: Core domain types (tasks, notifications, errors)
//! - [`notify`]: Notification bus with auto-expiry
//! - [`view`]: Derived task view and statistics
//! - [`storage`]: Session persistence
//! - [`infrastructure`]: Data directory resolution
//! - [`ui`]: Plain-text rendering
//! - [`cli`]: Command line parsing for the interactive loop
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! ```toml
//! # taskdeck.toml
//! api_url = "http://localhost:5000"
//! trace_level = "debug"
//! error_ms = 8000
//! ```
//!
//! The binary reads this file when its path is passed as the first argument,
//! then applies `TASKDECK_*` environment variables on top (`TASKDECK_API_URL`,
//! `TASKDECK_ERROR_MS`, ...).
//!
//! # Initialization Flow
//!
//! 1. **Startup** (`main.rs`):
//!    - Load configuration
//!    - Initialize tracing
//!    - Build the [`App`] via [`initialize`]
//!
//! 2. **Session Restore**:
//!    - Read the persisted user from the session file
//!    - Fetch that user's tasks
//!
//! 3. **Command Loop**:
//!    - Parse a line into an [`Event`]
//!    - Dispatch it until every remote call has settled
//!    - Render the resulting view model
//!
//! # Examples
//!
//! ```rust
//! use taskdeck::{initialize, Config, Event};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> taskdeck::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: Some(dir.path().to_path_buf()),
//!     ..Default::default()
//! };
//!
//! let mut app = initialize(&config)?;
//! app.dispatch(Event::ToggleAuthMode).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::{handle_event, Action, App, AppState, AuthMode, Event, Screen};
pub use domain::{Result, Task, TaskdeckError};
pub use notify::{NotificationBus, NotificationDurations};
pub use view::{compute_view, ViewParams};

use api::HttpApi;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::JsonSessionStore;

/// Default remote API location.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "TASKDECK_";

/// Client configuration.
///
/// Every key is optional; missing keys take the defaults below.
///
/// # Example
///
/// ```toml
/// api_url = "https://todo.example.com"
/// data_dir = "/var/lib/taskdeck"
/// trace_level = "debug"
/// success_ms = 3000
/// info_ms = 3000
/// warning_ms = 5000
/// error_ms = 6000
/// validation_ms = 6000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote API. Default: `http://localhost:5000`
    pub api_url: String,

    /// Directory holding the session and log files.
    ///
    /// Falls back to [`infrastructure::get_data_dir`] when unset.
    pub data_dir: Option<PathBuf>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Notification lifetimes in milliseconds. Zero keeps a kind on screen
    /// until it is dismissed.
    pub success_ms: u64,
    pub info_ms: u64,
    pub warning_ms: u64,
    pub error_ms: u64,
    pub validation_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let durations = NotificationDurations::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            trace_level: None,
            success_ms: millis(durations.success),
            info_ms: millis(durations.info),
            warning_ms: millis(durations.warning),
            error_ms: millis(durations.error),
            validation_ms: millis(durations.validation),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parameters
    ///
    /// * `config` - Map of configuration keys to raw string values
    ///
    /// # Parsing Rules
    ///
    /// - `api_url`: trimmed; blank values keep the default
    /// - `data_dir`: String → `PathBuf`
    /// - `trace_level`: String → `Option<String>`
    /// - `*_ms`: String → `u64` (falls back to the default on parse error)
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use taskdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://todo.local".to_string());
    /// map.insert("error_ms".to_string(), "9000".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_url, "http://todo.local");
    /// assert_eq!(config.error_ms, 9000);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let mut parsed = Self::default();
        parsed.apply(config);
        parsed
    }

    /// Overrides fields with the keys present in `overrides`, using the rules
    /// of [`Config::from_map`].
    pub fn apply(&mut self, overrides: &BTreeMap<String, String>) {
        if let Some(url) = overrides
            .get("api_url")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            self.api_url = url.to_string();
        }
        if let Some(dir) = overrides.get("data_dir").filter(|s| !s.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = overrides.get("trace_level") {
            self.trace_level = Some(level.clone());
        }

        let fields: [(&str, &mut u64); 5] = [
            ("success_ms", &mut self.success_ms),
            ("info_ms", &mut self.info_ms),
            ("warning_ms", &mut self.warning_ms),
            ("error_ms", &mut self.error_ms),
            ("validation_ms", &mut self.validation_ms),
        ];
        for (key, field) in fields {
            if let Some(raw) = overrides.get(key) {
                match raw.trim().parse::<u64>() {
                    Ok(ms) => *field = ms,
                    Err(_) => tracing::warn!(key, value = %raw, "ignoring non-numeric duration"),
                }
            }
        }
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Io`] when the file cannot be read and
    /// [`TaskdeckError::Config`] when it is not valid TOML for these keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| TaskdeckError::Config(format!("{}: {e}", path.display())))
    }

    /// Collects `TASKDECK_*` variables into configuration keys.
    ///
    /// `TASKDECK_API_URL=http://x` becomes `api_url = "http://x"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskdeck::Config;
    ///
    /// let vars = vec![
    ///     ("TASKDECK_ERROR_MS".to_string(), "100".to_string()),
    ///     ("PATH".to_string(), "/bin".to_string()),
    /// ];
    /// let map = Config::env_overrides(vars);
    /// assert_eq!(map.get("error_ms").map(String::as_str), Some("100"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn env_overrides(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> BTreeMap<String, String> {
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect()
    }

    /// Per-kind notification lifetimes.
    #[must_use]
    pub const fn durations(&self) -> NotificationDurations {
        NotificationDurations {
            success: Duration::from_millis(self.success_ms),
            error: Duration::from_millis(self.error_ms),
            warning: Duration::from_millis(self.warning_ms),
            info: Duration::from_millis(self.info_ms),
            validation: Duration::from_millis(self.validation_ms),
        }
    }

    /// The configured data directory, or the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::get_data_dir)
    }
}

/// Builds the client from configuration.
///
/// Wires an [`HttpApi`] pointed at `api_url`, a [`JsonSessionStore`] in the data
/// directory and a [`NotificationBus`] using the configured lifetimes. Call this
/// from inside a tokio runtime so notifications can expire.
///
/// # Parameters
///
/// * `config` - Client configuration
///
/// # Returns
///
/// An [`App`] showing the login screen. Call [`App::start`] to restore a
/// persisted session.
///
/// # Errors
///
/// - [`TaskdeckError::Config`] if `api_url` is blank
/// - [`TaskdeckError::Io`] if the data directory cannot be created or the
///   session file cannot be read. An unparseable session file is set aside
///   and the client starts signed out.
pub fn initialize(config: &Config) -> Result<App> {
    let _span = tracing::debug_span!("initialize", api_url = %config.api_url).entered();

    let api_url = config.api_url.trim();
    if api_url.is_empty() {
        return Err(TaskdeckError::Config("api_url must not be empty".to_string()));
    }

    let data_dir = config.data_dir();
    let sessions = JsonSessionStore::new(infrastructure::session_file(&data_dir))?;
    tracing::debug!(data_dir = %data_dir.display(), "initializing taskdeck");

    Ok(App::new(
        Box::new(HttpApi::new(api_url)),
        Box::new(sessions),
        NotificationBus::new(config.durations()),
    ))
}
