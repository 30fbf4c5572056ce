//! Header and statistics renderer.

use crate::ui::viewmodel::HeaderInfo;
use crate::view::TaskStats;
use std::io::{self, Write};

/// Renders the title bar: app name on the left, user badge on the right.
///
/// ```text
/// TodoApp                                                          ada [A]
/// ```
///
/// # Errors
///
/// Propagates write failures.
pub fn render_header(out: &mut dyn Write, header: &HeaderInfo, cols: usize) -> io::Result<()> {
    let badge = match header.initial {
        Some(initial) => format!("{} [{initial}]", header.username),
        None => header.username.clone(),
    };
    let gap = cols
        .saturating_sub(header.title.chars().count() + badge.chars().count())
        .max(1);
    writeln!(out, "{}{}{badge}", header.title, " ".repeat(gap))
}

/// Renders the statistics line.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_stats(out: &mut dyn Write, stats: &TaskStats) -> io::Result<()> {
    writeln!(
        out,
        "Total {}  Completed {}  Pending {}  High Priority {}  Progress {}%",
        stats.total, stats.completed, stats.pending, stats.high_priority, stats.completion_percent
    )
}
