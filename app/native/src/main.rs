#![allow(clippy::multiple_crate_versions)]

//! wkill - kill the window under the cursor on the focused sway workspace.
//!
//! The binary only parses the command line and reports errors; the work is
//! done by `wkill_lib`.

fn main() {
    if let Err(err) = wkill_lib::cli::run() {
        wkill_lib::cli::output::print_error(&err);
        std::process::exit(err.exit_code());
    }
}
