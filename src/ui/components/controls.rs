//! Filter and sort summary renderer.

use std::io::{self, Write};

/// Renders the active controls and how many tasks pass them.
///
/// ```text
/// Showing 3 of 7 | pending, priority desc, "milk"
/// ```
///
/// # Errors
///
/// Propagates write failures.
pub fn render_controls(
    out: &mut dyn Write,
    summary: &str,
    shown: usize,
    total: usize,
) -> io::Result<()> {
    writeln!(out, "Showing {shown} of {total} | {summary}")
}
