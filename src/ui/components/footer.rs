//! Footer component renderer.

use crate::ui::helpers::{truncate, write_centered};
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders the command help line centered, truncated to the terminal width.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_footer(out: &mut dyn Write, footer: &FooterInfo, cols: usize) -> io::Result<()> {
    write_centered(out, &truncate(&footer.keybindings, cols), cols)
}
