//! Shared rendering utilities.
//!
//! All widths are counted in `char`s, so multi-byte text never gets cut in the
//! middle of a code point.

use std::io::{self, Write};

/// Shortens `text` to at most `width` characters, marking the cut with `...`.
///
/// # Example
///
/// ```rust
/// use taskdeck::ui::helpers::truncate;
///
/// assert_eq!(truncate("write quarterly report", 10), "write q...");
/// assert_eq!(truncate("short", 10), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Left-aligns `text` in a column of `width` characters, truncating if needed.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let fill = width.saturating_sub(cut.chars().count());
    format!("{cut}{}", " ".repeat(fill))
}

/// Writes a horizontal separator line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_rule(out: &mut dyn Write, cols: usize) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(cols))
}

/// Writes `text` centered in `cols` columns.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_centered(out: &mut dyn Write, text: &str, cols: usize) -> io::Result<()> {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    writeln!(out, "{}{text}", " ".repeat(padding))
}
