//! Derived view of the task collection.
//!
//! - [`params`]: search term, status filter and sort selection
//! - [`engine`]: the pure [`compute_view`] pipeline
//! - [`stats`]: totals for the statistics panel

pub mod engine;
pub mod params;
pub mod stats;

pub use engine::compute_view;
pub use params::{SortKey, SortOrder, StatusFilter, ViewParams};
pub use stats::TaskStats;
