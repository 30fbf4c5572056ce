//! Top-level rendering coordinator.
//!
//! Chooses the layout for the view model's screen and delegates to the
//! components. Output is plain text; the caller decides where it goes.
//!
//! # Example
//!
//! ```rust
//! use taskdeck::app::AppState;
//! use taskdeck::ui::render;
//!
//! let state = AppState::new();
//! let mut out = Vec::new();
//! render(&state.compute_viewmodel(&[]), &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("Welcome Back"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;
use std::io::{self, Write};

/// Line width used by [`render`].
pub const DEFAULT_WIDTH: usize = 80;

/// Renders `vm` at [`DEFAULT_WIDTH`] columns.
///
/// # Errors
///
/// Propagates write failures.
pub fn render(vm: &UIViewModel, out: &mut impl Write) -> io::Result<()> {
    render_with_width(vm, out, DEFAULT_WIDTH)
}

/// Renders `vm` at `cols` columns.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_with_width(vm: &UIViewModel, out: &mut impl Write, cols: usize) -> io::Result<()> {
    match vm {
        UIViewModel::Login(login) => components::render_login(&mut *out, login, cols)?,
        UIViewModel::Dashboard(dashboard) => components::render_dashboard(&mut *out, dashboard, cols)?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::domain::{Task, User};

    fn rendered(state: &AppState) -> String {
        let mut out = Vec::new();
        render(&state.compute_viewmodel(&[]), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn dashboard_lists_tasks_and_stats() {
        let mut state = AppState::new();
        state.user = Some(User::new("ada"));
        let mut done = Task::new("a", "Buy milk");
        done.completed = true;
        state.set_tasks(vec![done, Task::new("b", "Write report")]);

        let text = rendered(&state);
        assert!(text.starts_with("TodoApp"));
        assert!(text.contains("ada [A]"));
        assert!(text.contains("Total 2  Completed 1  Pending 1"));
        assert!(text.contains("Progress 50%"));
        assert!(text.contains("[x]  Buy milk"));
        assert!(text.contains("Showing 2 of 2 | all, createdAt desc"));
    }

    #[test]
    fn empty_dashboard_says_so() {
        let mut state = AppState::new();
        state.user = Some(User::new("ada"));
        assert!(rendered(&state).contains("No todos found."));
    }
}
