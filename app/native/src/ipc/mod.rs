//! Window-manager IPC.
//!
//! Talks to a running sway instance over its i3-compatible Unix socket. wkill needs
//! two requests: `GET_TREE` for the layout snapshot and `RUN_COMMAND` to ask
//! the window manager to close a window.
//!
//! - [`protocol`] - message framing
//! - [`socket`] - socket path discovery

use std::os::unix::net::UnixStream;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::tree::LayoutTree;

pub mod protocol;
pub mod socket;

use protocol::{MessageType, read_message, write_message};

/// Errors from window-manager IPC.
#[derive(Debug, Error)]
pub enum IpcError {
    /// No socket path in the environment and no window manager reported one.
    #[error("could not locate the sway IPC socket (is SWAYSOCK set?)")]
    SocketNotFound,
    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// An outgoing request exceeds the frame size limit.
    #[error("request of {0} bytes is too large")]
    RequestTooLarge(usize),
    /// The reply could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The window manager rejected a command.
    #[error("command failed: {0}")]
    CommandFailed(String),
}

impl From<serde_json::Error> for IpcError {
    fn from(err: serde_json::Error) -> Self { Self::InvalidResponse(err.to_string()) }
}

/// The operations wkill needs from a window manager.
pub trait WindowManager {
    /// Fetches a fresh layout snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is not a tree.
    fn get_tree(&mut self) -> Result<LayoutTree, IpcError>;

    /// Runs a window-manager command.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError::CommandFailed`] if the window manager rejects the command.
    fn run_command(&mut self, command: &str) -> Result<(), IpcError>;
}

/// One entry of a `RUN_COMMAND` reply.
#[derive(Debug, Deserialize)]
struct CommandOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// A connection to the window manager's IPC socket.
#[derive(Debug)]
pub struct IpcClient {
    stream: UnixStream,
}

impl IpcClient {
    /// Connects to the socket of the running window manager.
    ///
    /// # Errors
    ///
    /// Returns an error if no socket can be found or the connection fails.
    pub fn connect() -> Result<Self, IpcError> {
        let path = socket::socket_path()?;
        Self::connect_to(&path)
    }

    /// Connects to a specific socket path.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub fn connect_to(path: &Path) -> Result<Self, IpcError> {
        tracing::debug!("ipc: connecting to {}", path.display());
        let stream = UnixStream::connect(path)?;
        Ok(Self { stream })
    }

    /// Sends a request and waits for the reply of the same type.
    fn request(&self, kind: MessageType, payload: &[u8]) -> Result<Vec<u8>, IpcError> {
        write_message(&self.stream, kind, payload)?;

        let (reply_kind, reply) = read_message(&self.stream)?;
        if reply_kind != kind.code() {
            return Err(IpcError::InvalidResponse(format!(
                "expected reply type {}, got {reply_kind}",
                kind.code()
            )));
        }

        tracing::trace!("ipc: {:?} reply of {} bytes", kind, reply.len());
        Ok(reply)
    }
}

impl WindowManager for IpcClient {
    fn get_tree(&mut self) -> Result<LayoutTree, IpcError> {
        let reply = self.request(MessageType::GetTree, b"")?;
        Ok(LayoutTree::from_json(&reply)?)
    }

    fn run_command(&mut self, command: &str) -> Result<(), IpcError> {
        tracing::debug!("ipc: run_command {command:?}");
        let reply = self.request(MessageType::RunCommand, command.as_bytes())?;
        check_command_reply(&reply)
    }
}

/// Fails if any command in a `RUN_COMMAND` reply was unsuccessful.
fn check_command_reply(reply: &[u8]) -> Result<(), IpcError> {
    let outcomes: Vec<CommandOutcome> = serde_json::from_slice(reply)?;

    match outcomes.into_iter().find(|outcome| !outcome.success) {
        Some(failed) => Err(IpcError::CommandFailed(
            failed.error.unwrap_or_else(|| "unknown error".to_string()),
        )),
        None => Ok(()),
    }
}
