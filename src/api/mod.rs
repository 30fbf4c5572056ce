//! Remote REST API access.
//!
//! # Modules
//!
//! - `backend`: the [`RemoteApi`] trait
//! - `client`: [`HttpApi`], the `reqwest` implementation
//! - `messages`: [`ApiRequest`] / [`ApiOutcome`] exchanged with the application
//! - `error`: [`ApiError`] and its mapping to user-facing text

pub mod backend;
pub mod client;
pub mod error;
pub mod messages;

pub use backend::RemoteApi;
pub use client::HttpApi;
pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use messages::{ApiOutcome, ApiRequest, Credentials};
