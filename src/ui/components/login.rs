//! Login screen renderer.

use crate::ui::helpers::write_centered;
use crate::ui::viewmodel::LoginViewModel;
use std::io::{self, Write};

/// Renders the form title and the commands that submit it.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_login_form(out: &mut dyn Write, vm: &LoginViewModel, cols: usize) -> io::Result<()> {
    writeln!(out)?;
    write_centered(out, &vm.title, cols)?;
    writeln!(out)?;

    if vm.needs_confirmation {
        writeln!(out, "  signup <username> <password> <confirm password>")?;
    } else {
        writeln!(out, "  login <username> <password>")?;
    }
    writeln!(out, "  toggle   ({})", vm.toggle_hint)?;

    if vm.busy {
        writeln!(out)?;
        write_centered(out, "Please wait...", cols)?;
    }
    Ok(())
}
