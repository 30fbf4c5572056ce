//! Empty state component renderer.

use crate::ui::helpers::write_centered;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Renders the centered empty-state message, with its subtitle below when set.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_empty_state(out: &mut dyn Write, empty: &EmptyState, cols: usize) -> io::Result<()> {
    writeln!(out)?;
    write_centered(out, &empty.message, cols)?;
    if !empty.subtitle.is_empty() {
        write_centered(out, &empty.subtitle, cols)?;
    }
    writeln!(out)
}
