//! IPC socket discovery.
//!
//! sway exports `SWAYSOCK` into every client's environment. `I3SOCK` and the
//! `i3` binary are consulted as well since sway also answers to them; an i3
//! session is reachable at the socket level only. When no variable is set
//! (e.g. when started from a different session) the binaries can print the
//! path themselves.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use super::IpcError;
use crate::utils::command::resolve_binary;

/// Environment variables checked, in order.
const SOCKET_ENV_VARS: [&str; 2] = ["SWAYSOCK", "I3SOCK"];

/// Window managers asked for their socket path, in order.
const SOCKET_PATH_BINARIES: [&str; 2] = ["sway", "i3"];

/// Finds the IPC socket of the running window manager.
///
/// # Errors
///
/// Returns [`IpcError::SocketNotFound`] if no socket path can be determined.
pub fn socket_path() -> Result<PathBuf, IpcError> {
    if let Some(path) = socket_path_from_env(|key| std::env::var_os(key)) {
        return Ok(path);
    }

    SOCKET_PATH_BINARIES
        .iter()
        .find_map(|binary| query_socket_path(binary))
        .ok_or(IpcError::SocketNotFound)
}

/// Returns the first non-empty socket variable.
pub fn socket_path_from_env(lookup: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    SOCKET_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Runs `<binary> --get-socketpath`.
fn query_socket_path(binary: &str) -> Option<PathBuf> {
    let path = resolve_binary(binary).ok()?;
    let output = Command::new(&path).arg("--get-socketpath").output().ok()?;

    if !output.status.success() {
        tracing::debug!("ipc: {} --get-socketpath exited with {}", path.display(), output.status);
        return None;
    }

    parse_socket_path_output(&String::from_utf8_lossy(&output.stdout))
}

fn parse_socket_path_output(stdout: &str) -> Option<PathBuf> {
    let trimmed = stdout.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
