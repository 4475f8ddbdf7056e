//! CLI command definitions using Clap.

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::{Generator, Shell, generate};

use super::output;
use crate::config::RunOptions;
use crate::dispatch::Sigkill;
use crate::error::WkillError;
use crate::ipc::{IpcClient, IpcError, WindowManager};
use crate::picker::{SelectionMode, Slurp};
use crate::tree::LayoutTree;
use crate::{logging, pipeline};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Kill the window under the cursor on your focused sway workspace.
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "wkill")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(after_long_help = r#"Examples:
  wkill                   # Click a window and SIGKILL its process
  wkill --nice            # Ask the window manager to close it instead
  wkill --dry-run -v      # Show what would be killed, with hit-test traces
  wkill --no-pixel        # Drag a rectangle; its top-left corner is used"#)]
pub struct Cli {
    /// Enable verbose debug output.
    #[arg(long, short)]
    pub verbose: bool,

    /// Use single-pixel selection with slurp (default).
    #[arg(long, overrides_with = "no_pixel")]
    pub pixel: bool,

    /// Use rectangle selection with slurp.
    #[arg(long = "no-pixel", overrides_with = "pixel")]
    pub no_pixel: bool,

    /// Show what would be killed, but do not kill.
    #[arg(long)]
    pub dry_run: bool,

    /// Politely ask the window manager to close the window instead of sending SIGKILL.
    #[arg(long)]
    pub nice: bool,

    /// Print shell completions for the given shell and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Collects the run options from the parsed flags.
    #[must_use]
    pub const fn options(&self) -> RunOptions {
        let selection = if self.no_pixel { SelectionMode::Rectangle } else { SelectionMode::Pixel };
        RunOptions::from_flags(self.verbose, selection, self.dry_run, self.nice)
    }

    /// Executes the CLI.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run.
    pub fn execute(&self) -> Result<(), WkillError> {
        if let Some(shell) = self.completions {
            Self::print_completions(shell);
            return Ok(());
        }

        let options = self.options();
        logging::init(options.diagnostics);

        output::print_prompt();

        let mut picker = Slurp;
        let mut window_manager = LazyIpc::default();
        let mut signaller = Sigkill;

        let action = pipeline::run(
            &options,
            &mut picker,
            &mut window_manager,
            &mut signaller,
            |node| output::print_target(node, &options),
        )?;

        output::print_action(&action);
        Ok(())
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wkill", &mut io::stdout());
    }
}

/// Connects to the window manager on first use, so a cancelled pick never
/// opens the socket.
#[derive(Debug, Default)]
struct LazyIpc(Option<IpcClient>);

impl LazyIpc {
    fn client(&mut self) -> Result<&mut IpcClient, IpcError> {
        let client = match self.0.take() {
            Some(client) => client,
            None => IpcClient::connect()?,
        };
        Ok(self.0.insert(client))
    }
}

impl WindowManager for LazyIpc {
    fn get_tree(&mut self) -> Result<LayoutTree, IpcError> { self.client()?.get_tree() }

    fn run_command(&mut self, command: &str) -> Result<(), IpcError> {
        self.client()?.run_command(command)
    }
}
