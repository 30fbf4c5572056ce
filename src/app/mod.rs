//! Application layer coordinating state, events, and actions.
//!
//! Sits between the front end (main.rs) and the domain, notification, view, API
//! and storage layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Remote Outcomes ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Screen and login-form modes
//! - [`runtime`]: [`App`], which executes actions and loops until settled
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{AuthMode, Screen};
pub use runtime::App;
pub use state::AppState;
