//! Run options.
//!
//! wkill has no configuration file and keeps no state between runs. Every
//! option comes from the command line and is collected into [`RunOptions`]
//! before the pipeline starts.

use crate::dispatch::Policy;
use crate::picker::SelectionMode;

/// Diagnostic settings passed explicitly to the resolver and the dispatcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Emit per-node hit-test traces and dispatch details.
    pub verbose: bool,
}

impl Diagnostics {
    #[must_use]
    pub const fn verbose() -> Self { Self { verbose: true } }

    /// Default `tracing` filter directive for this verbosity.
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        if self.verbose {
            "wkill=debug,wkill_lib=debug"
        } else {
            "wkill=warn,wkill_lib=warn"
        }
    }
}

/// Options for a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub diagnostics: Diagnostics,
    pub selection: SelectionMode,
    pub policy: Policy,
}

impl RunOptions {
    /// Builds options from the command-line selection mode and toggles.
    ///
    /// `dry_run` wins over the kill policy but remembers whether the kill
    /// would have been graceful.
    #[must_use]
    pub const fn from_flags(
        verbose: bool,
        selection: SelectionMode,
        dry_run: bool,
        nice: bool,
    ) -> Self {
        let policy = match (dry_run, nice) {
            (true, nice) => Policy::DryRun { nice },
            (false, true) => Policy::GracefulQuit,
            (false, false) => Policy::ForceKill,
        };

        Self {
            diagnostics: Diagnostics { verbose },
            selection,
            policy,
        }
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool { matches!(self.policy, Policy::DryRun { .. }) }

    #[must_use]
    pub const fn is_nice(&self) -> bool {
        matches!(self.policy, Policy::GracefulQuit | Policy::DryRun { nice: true })
    }
}
