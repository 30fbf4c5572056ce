//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. After processing an event it returns a
//! `Vec<Action>`; the [`App`](crate::app::App) runtime executes them in order and
//! turns remote call results back into events.
//!
//! # Example
//!
//! ```rust
//! use taskdeck::api::ApiRequest;
//! use taskdeck::app::Action;
//!
//! let actions = vec![Action::Call(ApiRequest::list_tasks("ada".to_string()))];
//! ```

use crate::api::ApiRequest;
use crate::domain::User;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Performs a remote call. Its outcome comes back as
    /// [`Event::ApiCompleted`](crate::app::Event::ApiCompleted).
    Call(ApiRequest),

    /// Remembers the signed-in user across restarts.
    PersistSession(User),

    /// Forgets the persisted user.
    ClearSession,
}
