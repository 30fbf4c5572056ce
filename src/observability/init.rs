//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "taskdeck.log";

/// Initializes the global tracing subscriber writing to a rotating log file.
///
/// # Parameters
///
/// * `config` - Configuration holding `trace_level` and the data directory
///
/// # Returns
///
/// The log file path, or `None` when logging could not be set up.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` environment variable (highest priority)
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently gives up if directory creation fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// Nothing is ever written to stdout, which belongs to the interactive screen.
///
/// # Example
///
/// ```rust
/// use taskdeck::observability::init_tracing;
/// use taskdeck::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     data_dir: Some(dir.path().to_path_buf()),
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let log_file = data_dir.join(LOG_FILE_NAME);
    let writer = RotatingFileWriter::new(log_file.clone());

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    subscriber.try_init().ok()?;
    tracing::info!(path = %log_file.display(), level = %level, "tracing initialized");
    Some(log_file)
}
