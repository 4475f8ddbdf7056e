//! Wire representation of the window-manager `GET_TREE` reply.
//!
//! These types mirror the JSON emitted by sway and i3 and only exist long
//! enough to be flattened into a [`LayoutTree`](super::LayoutTree). Fields this
//! tool has no use for are ignored by serde.

use serde::Deserialize;

use super::Rect;

/// The `type` field of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawNodeType {
    Root,
    Output,
    Workspace,
    Con,
    FloatingCon,
    Dockarea,
    #[serde(other)]
    Unknown,
}

/// A node exactly as the window manager serialises it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub node_type: RawNodeType,

    #[serde(default)]
    pub rect: Rect,

    /// Only present on view-bearing nodes.
    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(default)]
    pub focused: bool,

    #[serde(default)]
    pub pid: Option<i32>,

    /// Wayland app id. `null` for Xwayland clients.
    #[serde(default)]
    pub app_id: Option<String>,

    #[serde(default)]
    pub nodes: Vec<Self>,

    #[serde(default)]
    pub floating_nodes: Vec<Self>,
}
