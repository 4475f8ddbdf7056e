//! The wkill pipeline.
//!
//! ```text
//! pick point → fetch tree → hit test → dispatch
//! ```
//!
//! A single sequential pass with no retries. Cancelling the pick ends the run
//! before the window manager is contacted, and any failure before dispatch
//! leaves every process untouched.

use crate::config::RunOptions;
use crate::dispatch::{Action, ProcessSignaller, dispatch};
use crate::error::WkillError;
use crate::ipc::WindowManager;
use crate::picker::PointPicker;
use crate::resolver::find_window_at;
use crate::tree::LayoutNode;

/// Runs one pass of the pipeline.
///
/// `on_target` is called with the matched window right before dispatch.
///
/// # Errors
///
/// Returns the first error raised by any stage.
pub fn run(
    options: &RunOptions,
    picker: &mut impl PointPicker,
    window_manager: &mut impl WindowManager,
    signaller: &mut impl ProcessSignaller,
    on_target: impl FnOnce(&LayoutNode),
) -> Result<Action, WkillError> {
    let point = picker.pick(options.selection)?;
    tracing::debug!("pipeline: selected point {point}");

    let tree = window_manager.get_tree()?;
    tracing::debug!("pipeline: tree snapshot with {} nodes", tree.len());

    let target = &tree[find_window_at(&tree, point, options.diagnostics)?];
    on_target(target);

    Ok(dispatch(target, options.policy, window_manager, signaller, options.diagnostics)?)
}
