//! Composable UI component renderers.
//!
//! Every component writes plain text to a `dyn Write` and propagates I/O errors.
//!
//! # Components
//!
//! - [`header`]: Title bar with user badge, statistics line
//! - [`controls`]: Active search, filter and sort summary
//! - [`table`]: Task rows with checkbox, priority, due date, tags and notes
//! - [`empty`]: Empty state message for no rows
//! - [`toasts`]: Visible notifications
//! - [`footer`]: Command help
//! - [`login`]: Login and signup form
//!
//! # Layouts
//!
//! - [`render_dashboard`]: Header + Stats + Controls + Table + Toasts + Footer
//! - [`render_login`]: Form + Toasts

mod controls;
mod empty;
mod footer;
mod header;
mod login;
mod table;
mod toasts;

use crate::ui::helpers::write_rule;
use crate::ui::viewmodel::{DashboardViewModel, LoginViewModel};
use std::io::{self, Write};

use controls::render_controls;
use empty::render_empty_state;
use footer::render_footer;
use header::{render_header, render_stats};
use login::render_login_form;
use table::{render_table_headers, render_table_rows};
use toasts::render_toasts;

/// Renders the dashboard layout.
///
/// ```text
/// [Header]
/// [Border]
/// [Stats]
/// [Controls]
/// [Border]
/// [Table Headers + Rows | Empty State]
/// [Border]
/// [Toasts]
/// [Footer]
/// ```
///
/// # Errors
///
/// Propagates write failures.
pub fn render_dashboard(out: &mut dyn Write, vm: &DashboardViewModel, cols: usize) -> io::Result<()> {
    render_header(out, &vm.header, cols)?;
    write_rule(out, cols)?;
    render_stats(out, &vm.stats)?;
    render_controls(out, &vm.filter_summary, vm.shown, vm.stats.total)?;
    write_rule(out, cols)?;

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, cols)?;
    } else {
        render_table_headers(out, cols)?;
        render_table_rows(out, &vm.display_items, cols)?;
    }

    write_rule(out, cols)?;
    render_toasts(out, &vm.toasts)?;
    render_footer(out, &vm.footer, cols)
}

/// Renders the login layout.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_login(out: &mut dyn Write, vm: &LoginViewModel, cols: usize) -> io::Result<()> {
    render_login_form(out, vm, cols)?;
    if !vm.toasts.is_empty() {
        write_rule(out, cols)?;
        render_toasts(out, &vm.toasts)?;
    }
    Ok(())
}
