//! Session persistence abstraction.
//!
//! The client remembers who is signed in between runs and nothing else; tasks
//! always come from the remote API. The [`SessionStore`] trait keeps the runtime
//! independent of where that record lives.

use crate::domain::error::Result;
use crate::domain::User;

/// Key the signed-in user record is stored under.
pub const SESSION_KEY: &str = "todoUser";

/// Persistent home of the signed-in user record.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::storage::JsonSessionStore): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use taskdeck::domain::User;
/// use taskdeck::storage::{JsonSessionStore, SessionStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonSessionStore::new(PathBuf::from("/tmp/taskdeck/session.json"))?;
/// store.save_session(&User::new("ada"))?;
/// assert_eq!(store.load_session()?.map(|u| u.username), Some("ada".to_string()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait SessionStore: Send {
    /// Returns the persisted user, or `None` when nobody is signed in.
    ///
    /// A stored record that no longer decodes is reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_session(&self) -> Result<Option<User>>;

    /// Replaces the persisted user.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_session(&mut self, user: &User) -> Result<()>;

    /// Forgets the persisted user. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear_session(&mut self) -> Result<()>;
}
