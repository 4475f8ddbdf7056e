//! Action dispatch.
//!
//! Turns a matched window and a [`Policy`] into a termination action:
//!
//! - `ForceKill` sends `SIGKILL` to the owning process
//! - `GracefulQuit` asks the window manager to close the window, which the
//!   client is free to ignore
//! - `DryRun` does nothing and describes what would have happened
//!
//! Nothing is retried. A failed signal or close request is reported as
//! [`DispatchError::TerminationFailed`].

use std::fmt;

use tracing::{debug, info};

use crate::config::Diagnostics;
use crate::error::DispatchError;
use crate::ipc::WindowManager;
use crate::tree::LayoutNode;

/// How to terminate the matched window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Send `SIGKILL` to the owning process.
    #[default]
    ForceKill,
    /// Ask the window manager to close the window.
    GracefulQuit,
    /// Report what would be done. `nice` selects which action is described.
    DryRun { nice: bool },
}

/// Delivers signals to processes.
pub trait ProcessSignaller {
    /// Sends `SIGKILL` to `pid`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the signal could not be delivered.
    fn send_kill(&mut self, pid: i32) -> std::io::Result<()>;
}

/// Signals real processes through `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigkill;

impl ProcessSignaller for Sigkill {
    fn send_kill(&mut self, pid: i32) -> std::io::Result<()> {
        // Group and broadcast targets are never valid here.
        if pid <= 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::InvalidInput));
        }

        // SAFETY: `kill` has no memory-safety preconditions; `pid` is a
        // single positive process id.
        let result = unsafe { libc::kill(pid, libc::SIGKILL) };
        if result == 0 { Ok(()) } else { Err(std::io::Error::last_os_error()) }
    }
}

/// The action taken, or planned, for a window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Dry run: nothing was done.
    Planned { pid: i32, label: String, nice: bool },
    /// `SIGKILL` was delivered.
    Killed { pid: i32 },
    /// The window manager accepted the close request.
    CloseRequested { node_id: i64, pid: i32 },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planned { pid, label, nice } => {
                let nicely = if *nice { "nicely " } else { "" };
                write!(f, "[DRY-RUN] Would {nicely}kill process {pid} ({label})")
            }
            Self::Killed { pid } => write!(f, "Killed process {pid}"),
            Self::CloseRequested { node_id, pid } => {
                write!(f, "Asked window {node_id} (process {pid}) to close")
            }
        }
    }
}

/// Window-manager command that closes a single container.
#[must_use]
pub fn close_command(node_id: i64) -> String { format!("[con_id={node_id}] kill") }

/// Terminates, or describes terminating, the process owning `node`.
///
/// # Errors
///
/// Returns [`DispatchError::MissingProcessId`] if the node has no pid, and
/// [`DispatchError::TerminationFailed`] if the signal or command fails.
pub fn dispatch(
    node: &LayoutNode,
    policy: Policy,
    window_manager: &mut impl WindowManager,
    signaller: &mut impl ProcessSignaller,
    diagnostics: Diagnostics,
) -> Result<Action, DispatchError> {
    let pid = node.pid.ok_or(DispatchError::MissingProcessId { node_id: node.id })?;

    if diagnostics.verbose {
        debug!(
            "dispatch: window id={}, name={:?}, app_id={:?}, pid={pid}, policy={policy:?}",
            node.id, node.name, node.app_id
        );
    }

    let action = match policy {
        Policy::DryRun { nice } => Action::Planned {
            pid,
            label: node.label().to_string(),
            nice,
        },
        Policy::ForceKill => {
            signaller.send_kill(pid).map_err(|err| DispatchError::TerminationFailed {
                target: format!("process {pid}"),
                reason: err.to_string(),
            })?;
            Action::Killed { pid }
        }
        Policy::GracefulQuit => {
            window_manager.run_command(&close_command(node.id)).map_err(|err| {
                DispatchError::TerminationFailed {
                    target: format!("process {pid}"),
                    reason: err.to_string(),
                }
            })?;
            Action::CloseRequested { node_id: node.id, pid }
        }
    };

    info!("dispatch: {action}");
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::IpcError;
    use crate::tree::{ChildList, LayoutTree, NodeKind, Rect};

    #[derive(Default)]
    struct RecordingWm {
        commands: Vec<String>,
        reject: bool,
    }

    impl WindowManager for RecordingWm {
        fn get_tree(&mut self) -> Result<LayoutTree, IpcError> {
            Err(IpcError::InvalidResponse("not used".to_string()))
        }

        fn run_command(&mut self, command: &str) -> Result<(), IpcError> {
            self.commands.push(command.to_string());
            if self.reject {
                Err(IpcError::CommandFailed("No matching node".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingSignaller {
        killed: Vec<i32>,
        fail_with: Option<std::io::ErrorKind>,
    }

    impl ProcessSignaller for RecordingSignaller {
        fn send_kill(&mut self, pid: i32) -> std::io::Result<()> {
            self.killed.push(pid);
            match self.fail_with {
                Some(kind) => Err(std::io::Error::from(kind)),
                None => Ok(()),
            }
        }
    }

    fn window(pid: Option<i32>) -> LayoutNode {
        LayoutNode {
            id: 7,
            name: Some("ed".to_string()),
            app_id: None,
            kind: NodeKind::WindowContainer,
            rect: Rect::new(0, 0, 500, 500),
            visible: true,
            focused: false,
            pid,
            parent: None,
            children: ChildList::new(),
            floating: ChildList::new(),
        }
    }

    #[test]
    fn test_force_kill_signals_pid() {
        let mut wm = RecordingWm::default();
        let mut signaller = RecordingSignaller::default();

        let action = dispatch(
            &window(Some(10)),
            Policy::ForceKill,
            &mut wm,
            &mut signaller,
            Diagnostics::default(),
        )
        .unwrap();

        assert_eq!(action, Action::Killed { pid: 10 });
        assert_eq!(signaller.killed, vec![10]);
        assert!(wm.commands.is_empty());
    }

    #[test]
    fn test_graceful_quit_sends_close_command() {
        let mut wm = RecordingWm::default();
        let mut signaller = RecordingSignaller::default();

        let action = dispatch(
            &window(Some(10)),
            Policy::GracefulQuit,
            &mut wm,
            &mut signaller,
            Diagnostics::verbose(),
        )
        .unwrap();

        assert_eq!(action, Action::CloseRequested { node_id: 7, pid: 10 });
        assert_eq!(wm.commands, vec!["[con_id=7] kill".to_string()]);
        assert!(signaller.killed.is_empty());
    }

    #[test]
    fn test_dry_run_does_nothing() {
        let mut wm = RecordingWm::default();
        let mut signaller = RecordingSignaller::default();

        let action = dispatch(
            &window(Some(10)),
            Policy::DryRun { nice: false },
            &mut wm,
            &mut signaller,
            Diagnostics::default(),
        )
        .unwrap();

        assert_eq!(action.to_string(), "[DRY-RUN] Would kill process 10 (ed)");
        assert!(wm.commands.is_empty());
        assert!(signaller.killed.is_empty());
    }

    #[test]
    fn test_dry_run_nice_description() {
        let action = dispatch(
            &window(Some(10)),
            Policy::DryRun { nice: true },
            &mut RecordingWm::default(),
            &mut RecordingSignaller::default(),
            Diagnostics::default(),
        )
        .unwrap();

        assert_eq!(action.to_string(), "[DRY-RUN] Would nicely kill process 10 (ed)");
    }

    #[test]
    fn test_missing_pid_performs_no_action() {
        for policy in [Policy::ForceKill, Policy::GracefulQuit, Policy::DryRun { nice: false }] {
            let mut wm = RecordingWm::default();
            let mut signaller = RecordingSignaller::default();

            let err = dispatch(&window(None), policy, &mut wm, &mut signaller, Diagnostics::default())
                .unwrap_err();

            assert!(matches!(err, DispatchError::MissingProcessId { node_id: 7 }));
            assert!(wm.commands.is_empty());
            assert!(signaller.killed.is_empty());
        }
    }

    #[test]
    fn test_signal_failure_is_reported_once() {
        let mut signaller = RecordingSignaller {
            fail_with: Some(std::io::ErrorKind::PermissionDenied),
            ..Default::default()
        };

        let err = dispatch(
            &window(Some(1)),
            Policy::ForceKill,
            &mut RecordingWm::default(),
            &mut signaller,
            Diagnostics::default(),
        )
        .unwrap_err();

        assert!(matches!(err, DispatchError::TerminationFailed { .. }));
        assert!(err.to_string().contains("process 1"));
        assert_eq!(signaller.killed, vec![1]);
    }

    #[test]
    fn test_rejected_close_is_reported() {
        let mut wm = RecordingWm {
            reject: true,
            ..Default::default()
        };

        let err = dispatch(
            &window(Some(10)),
            Policy::GracefulQuit,
            &mut wm,
            &mut RecordingSignaller::default(),
            Diagnostics::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("No matching node"));
        assert_eq!(wm.commands.len(), 1);
    }

    #[test]
    fn test_sigkill_rejects_non_positive_pids() {
        assert!(Sigkill.send_kill(0).is_err());
        assert!(Sigkill.send_kill(-1).is_err());
    }

    #[test]
    fn test_sigkill_reports_missing_process() {
        // Far above the default pid_max, so no such process exists.
        let err = Sigkill.send_kill(i32::MAX).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ESRCH));
    }

    #[test]
    fn test_close_command() {
        assert_eq!(close_command(94_123), "[con_id=94123] kill");
    }
}
