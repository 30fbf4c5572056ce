//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{get_data_dir, resolve_data_dir, session_file, DATA_DIR_ENV, SESSION_FILE_NAME};
