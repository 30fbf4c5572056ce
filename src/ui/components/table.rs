//! Task table renderer.
//!
//! Each task takes one main line plus optional indented lines for tags and notes:
//!
//! ```text
//!   #  DONE  TASK                                  PRIORITY  DUE
//!   1  [x]   Buy milk                              high      2025-01-01
//!            tags: errand, home
//!            notes: 2% only
//! ```

use crate::ui::helpers::pad;
use crate::ui::viewmodel::DisplayItem;
use std::io::{self, Write};

const NUMBER_WIDTH: usize = 3;
const CHECK_WIDTH: usize = 5;
const PRIORITY_WIDTH: usize = 9;
const DUE_WIDTH: usize = 12;
const MIN_TEXT_WIDTH: usize = 12;

/// Width left for the task text once the fixed columns are placed.
fn text_width(cols: usize) -> usize {
    cols.saturating_sub(NUMBER_WIDTH + CHECK_WIDTH + PRIORITY_WIDTH + DUE_WIDTH + 4)
        .max(MIN_TEXT_WIDTH)
}

/// Renders the column headers.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_table_headers(out: &mut dyn Write, cols: usize) -> io::Result<()> {
    writeln!(
        out,
        "{:>NUMBER_WIDTH$}  {}{} {}{}",
        "#",
        pad("DONE", CHECK_WIDTH),
        pad("TASK", text_width(cols)),
        pad("PRIORITY", PRIORITY_WIDTH),
        "DUE"
    )
}

/// Renders every row in order.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_table_rows(out: &mut dyn Write, items: &[DisplayItem], cols: usize) -> io::Result<()> {
    for item in items {
        render_table_row(out, item, cols)?;
    }
    Ok(())
}

fn render_table_row(out: &mut dyn Write, item: &DisplayItem, cols: usize) -> io::Result<()> {
    let check = if item.completed { "[x]" } else { "[ ]" };
    let due = match (&item.due_date, item.overdue) {
        (Some(date), true) => format!("{date} !"),
        (Some(date), false) => date.clone(),
        (None, _) => String::new(),
    };

    writeln!(
        out,
        "{:>NUMBER_WIDTH$}  {}{} {}{}",
        item.number,
        pad(check, CHECK_WIDTH),
        pad(&item.text, text_width(cols)),
        pad(item.priority.as_str(), PRIORITY_WIDTH),
        due.trim_end()
    )?;

    let indent = " ".repeat(NUMBER_WIDTH + 2 + CHECK_WIDTH);
    if !item.tags.is_empty() {
        writeln!(out, "{indent}tags: {}", item.tags.join(", "))?;
    }
    if let Some(notes) = &item.notes {
        writeln!(out, "{indent}notes: {notes}")?;
    }
    Ok(())
}
