//! CLI module for wkill.
//!
//! Parses the command line, prints user-facing messages, and drives the
//! pipeline with the real collaborators (`slurp`, the window-manager socket,
//! and `kill(2)`).

mod commands;
pub mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::WkillError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), WkillError> {
    let cli = Cli::parse();
    cli.execute()
}
