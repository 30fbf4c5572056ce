//! Domain layer for the taskdeck client.
//!
//! Core types with no dependency on the network, storage or presentation layers.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`task`]: Task records plus the add/edit form inputs
//! - [`notification`]: Notification records and kinds
//! - [`user`]: Signed-in user record
//!
//! # Examples
//!
//! ```
//! use taskdeck::domain::{Result, TaskDraft};
//!
//! fn draft() -> Result<()> {
//!     let new_task = TaskDraft::new("Buy milk").validate()?;
//!     assert_eq!(new_task.text, "Buy milk");
//!     Ok(())
//! }
//! # draft().unwrap();
//! ```

pub mod error;
pub mod notification;
pub mod task;
pub mod user;

pub use error::{Result, TaskdeckError};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use task::{parse_date, parse_tags, NewTask, Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use user::User;
