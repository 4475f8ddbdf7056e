//! wkill - kill the window under the cursor on a sway desktop.
//!
//! The IPC layer also speaks to i3, whose protocol sway shares, but picking
//! a point needs slurp (Wayland only) and i3 trees carry no `pid` or
//! `visible` fields, so no i3 window can be targeted.
//!
//! The user clicks a point, wkill fetches the window manager's layout tree,
//! finds the topmost window at that point on the focused workspace, and
//! terminates the process that owns it.
//!
//! The hit test lives in [`resolver`] and works on the arena snapshot from
//! [`tree`]. Everything else connects it to the outside world.

// Emit a clear compile-time error if attempted to compile on unsupported platforms
#[cfg(not(unix))]
compile_error!("wkill talks to sway over a Unix socket and only supports Unix systems.");

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ipc;
pub mod logging;
pub mod picker;
pub mod pipeline;
pub mod resolver;
pub mod tree;
pub mod utils;
