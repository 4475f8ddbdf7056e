//! Logging setup.
//!
//! Logs go to stderr so they never mix with the messages wkill prints on
//! stdout. `RUST_LOG` replaces the default filter when set.

use tracing_subscriber::EnvFilter;

use crate::config::Diagnostics;

/// Installs the global `tracing` subscriber.
///
/// Only the first call installs a subscriber.
pub fn init(diagnostics: Diagnostics) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(diagnostics.filter_directive()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(err) = result {
        eprintln!("wkill: warning: logging already initialized: {err}");
    }
}
