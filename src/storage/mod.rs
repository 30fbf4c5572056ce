//! Storage layer for the persisted session.
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait abstraction
//! - `json`: JSON file-based implementation

pub mod backend;
pub mod json;

pub use backend::{SessionStore, SESSION_KEY};
pub use json::JsonSessionStore;
