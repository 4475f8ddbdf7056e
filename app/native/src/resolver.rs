//! Hit testing.
//!
//! Finds the window the user clicked on the focused workspace. Floating
//! windows are searched first, topmost first, because they render above tiled
//! windows and may overlap each other. Tiled windows never overlap, so the
//! order they are visited in does not change the result.

use tracing::debug;

use crate::config::Diagnostics;
use crate::error::WkillError;
use crate::tree::{LayoutNode, LayoutTree, NodeIndex, NodeKind, Point};

/// Returns the workspace that holds the focused node.
///
/// Walks up from the focused node (inclusive). Returns `None` if nothing is
/// focused or the focused node is not inside a workspace.
#[must_use]
pub fn focused_workspace(tree: &LayoutTree, diagnostics: Diagnostics) -> Option<NodeIndex> {
    let Some(focused) = tree.focused() else {
        debug!("resolver: no focused node in tree");
        return None;
    };

    if diagnostics.verbose {
        let node = &tree[focused];
        debug!(
            "resolver: focused node id={}, name={:?}, type={}",
            node.id, node.name, node.kind
        );
    }

    let workspace = tree.ancestors(focused).find(|&idx| tree[idx].kind == NodeKind::Workspace);

    if let Some(idx) = workspace {
        debug!("resolver: focused workspace id={}, name={:?}", tree[idx].id, tree[idx].name);
    } else {
        debug!("resolver: focused node has no workspace ancestor");
    }

    workspace
}

/// Check if `node` is a window the user can target at `point`.
///
/// The point must fall inside the node's half-open rectangle, the node must
/// hold a window, be visible, and carry a name or an app id.
#[must_use]
pub fn contains(node: &LayoutNode, point: Point) -> bool {
    node.rect.contains_point(point) && node.kind.is_window() && node.visible && node.is_identifiable()
}

fn is_hit(tree: &LayoutTree, index: NodeIndex, point: Point, diagnostics: Diagnostics) -> bool {
    let node = &tree[index];
    if diagnostics.verbose {
        debug!(
            "resolver: checking node id={}, name={:?}, type={}, rect={}, app_id={:?}",
            node.id, node.name, node.kind, node.rect, node.app_id
        );
    }
    contains(node, point)
}

/// Find the topmost window at `point` inside `workspace`.
///
/// 1. Floating containers from the top of the stack down. Each container is
///    tested before its own descendants.
/// 2. The tiled subtree, breadth first.
///
/// Returns `None` if no node passes [`contains`].
#[must_use]
pub fn resolve(
    tree: &LayoutTree,
    workspace: NodeIndex,
    point: Point,
    diagnostics: Diagnostics,
) -> Option<NodeIndex> {
    let floating = &tree.get(workspace)?.floating;
    debug!("resolver: {} floating nodes on workspace", floating.len());

    for &container in floating.iter().rev() {
        if is_hit(tree, container, point, diagnostics) {
            debug!("resolver: matched floating node id={}", tree[container].id);
            return Some(container);
        }

        if let Some(child) =
            tree.descendants(container).find(|&idx| is_hit(tree, idx, point, diagnostics))
        {
            debug!("resolver: matched floating child node id={}", tree[child].id);
            return Some(child);
        }
    }

    let tiled = tree.tiled_descendants(workspace).find(|&idx| is_hit(tree, idx, point, diagnostics));

    if let Some(idx) = tiled {
        debug!("resolver: matched tiled node id={}", tree[idx].id);
    } else {
        debug!("resolver: no window found at {point}");
    }

    tiled
}

/// Find the window at `point` on the focused workspace.
///
/// # Errors
///
/// Returns [`WkillError::NoFocusedWorkspace`] or [`WkillError::NoWindowUnderPoint`].
pub fn find_window_at(
    tree: &LayoutTree,
    point: Point,
    diagnostics: Diagnostics,
) -> Result<NodeIndex, WkillError> {
    let workspace = focused_workspace(tree, diagnostics).ok_or(WkillError::NoFocusedWorkspace)?;
    resolve(tree, workspace, point, diagnostics).ok_or(WkillError::NoWindowUnderPoint)
}
