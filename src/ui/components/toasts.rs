//! Notification toast renderer.

use crate::ui::viewmodel::ToastItem;
use std::io::{self, Write};

/// Renders visible notifications, oldest first.
///
/// ```text
/// (1) success: Todo added successfully!
/// (2) error: Network error. Please try again.
/// ```
///
/// # Errors
///
/// Propagates write failures.
pub fn render_toasts(out: &mut dyn Write, toasts: &[ToastItem]) -> io::Result<()> {
    for toast in toasts {
        writeln!(out, "({}) {}: {}", toast.number, toast.kind, toast.message)?;
    }
    Ok(())
}
