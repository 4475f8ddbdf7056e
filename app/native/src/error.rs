//! Error types for wkill.
//!
//! Every failure is terminal for the run: nothing is retried, and no error
//! path sends a signal or a close request.

use thiserror::Error;

use crate::ipc::IpcError;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum WkillError {
    /// The user aborted point selection.
    #[error("Selection cancelled or error.")]
    SelectionCancelled,
    /// The tree has no focused node, or the focused node has no workspace ancestor.
    #[error("Could not find the focused workspace.")]
    NoFocusedWorkspace,
    /// The hit test found no window at the selected point.
    #[error("No window found under cursor in the focused workspace.")]
    NoWindowUnderPoint,
    /// The matched window could not be terminated.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// The point picker could not be run or produced unreadable output.
    #[error("Point selection failed: {0}")]
    Picker(String),
    /// Communication with the window manager failed.
    #[error("IPC error: {0}")]
    Ipc(#[from] IpcError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WkillError {
    /// Returns true if the user cancelled the run.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool { matches!(self, Self::SelectionCancelled) }

    /// Process exit code for this error. Cancelling is a clean exit.
    #[must_use]
    pub const fn exit_code(&self) -> i32 { if self.is_cancellation() { 0 } else { 1 } }
}

/// Errors from the action dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The matched node does not report an owning process.
    #[error("Could not find PID for the selected window (node {node_id}).")]
    MissingProcessId { node_id: i64 },
    /// Signal delivery or the close command failed.
    #[error("Error killing {target}: {reason}")]
    TerminationFailed { target: String, reason: String },
}
