//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into plain-text screens through composable
//! rendering components.
//!
//! # Architecture
//!
//! ```text
//! AppState + tray → compute_viewmodel → UIViewModel → render → Write
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared width and alignment utilities

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_with_width, DEFAULT_WIDTH};
pub use viewmodel::{
    DashboardViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, LoginViewModel,
    ToastItem, UIViewModel,
};
