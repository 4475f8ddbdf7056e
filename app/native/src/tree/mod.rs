//! Layout tree snapshots.
//!
//! A snapshot is an immutable copy of the window manager's container tree,
//! flattened into an arena:
//!
//! - `LayoutTree.nodes` owns every [`LayoutNode`]
//! - `LayoutNode.children` → tiled children (`NodeIndex` into the arena)
//! - `LayoutNode.floating` → floating children in stacking order (index 0 is bottommost)
//! - `LayoutNode.parent` → the owning node, `None` for the root
//!
//! Parent links are plain indices, so upward walks never hold a reference
//! cycle. A snapshot is built once per run and dropped after the hit test.

use std::collections::{HashMap, VecDeque};
use std::ops::Index;

use smallvec::SmallVec;

mod geometry;
mod raw;

pub use geometry::{Point, Rect};
pub use raw::{RawNode, RawNodeType};

// ============================================================================
// Node Types
// ============================================================================

/// Index of a node inside its [`LayoutTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

/// Child list type alias. Most containers hold a handful of children, so they
/// are stored inline.
pub type ChildList = SmallVec<[NodeIndex; 4]>;

/// The role a node plays in the container tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Output,
    Workspace,
    /// A tiled container that only arranges other containers.
    SplitContainer,
    /// A tiled container holding a client window.
    WindowContainer,
    /// A top-level floating container.
    FloatingWindowContainer,
    /// i3 dock areas and node types this tool does not know about.
    Other,
}

impl NodeKind {
    /// Returns the kind as a static string for log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Output => "output",
            Self::Workspace => "workspace",
            Self::SplitContainer => "split",
            Self::WindowContainer => "con",
            Self::FloatingWindowContainer => "floating_con",
            Self::Other => "other",
        }
    }

    /// Returns true for kinds that can hold a client window.
    #[must_use]
    pub const fn is_window(self) -> bool {
        matches!(self, Self::WindowContainer | Self::FloatingWindowContainer)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the layout snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutNode {
    /// Window-manager container id, unique within one snapshot.
    pub id: i64,

    /// Display name (window title for views). Empty names are stored as `None`.
    pub name: Option<String>,

    /// Application identifier. Empty ids are stored as `None`.
    pub app_id: Option<String>,

    pub kind: NodeKind,

    pub rect: Rect,

    /// Whether the window manager reports the node as visible.
    /// Nodes without a `visible` field are not visible.
    pub visible: bool,

    /// Whether this is the currently focused node.
    pub focused: bool,

    /// Owning process. Only positive pids are kept.
    pub pid: Option<i32>,

    pub parent: Option<NodeIndex>,

    /// Tiled children in layout order.
    pub children: ChildList,

    /// Floating children in stacking order (back to front).
    pub floating: ChildList,
}

impl LayoutNode {
    /// Returns the best human-readable label: name, then app id.
    #[must_use]
    pub fn label(&self) -> &str { self.name.as_deref().or(self.app_id.as_deref()).unwrap_or("") }

    /// Returns true if the node carries a name or an application id.
    #[must_use]
    pub const fn is_identifiable(&self) -> bool { self.name.is_some() || self.app_id.is_some() }
}

// ============================================================================
// Arena
// ============================================================================

/// An immutable, arena-backed snapshot of the window-manager tree.
#[derive(Clone, Debug)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    by_id: HashMap<i64, NodeIndex>,
}

impl LayoutTree {
    /// Parse a snapshot from the JSON body of a `GET_TREE` reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid tree.
    pub fn from_json(json: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawNode = serde_json::from_slice(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a snapshot from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid tree.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw: RawNode = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    /// Flatten a wire tree into the arena. The root is always at index 0.
    #[must_use]
    pub fn from_raw(raw: RawNode) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            by_id: HashMap::new(),
        };
        tree.insert(raw, None, false);
        tree
    }

    fn insert(&mut self, raw: RawNode, parent: Option<NodeIndex>, floating: bool) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        let kind = classify(&raw, floating);

        self.nodes.push(LayoutNode {
            id: raw.id,
            name: raw.name.filter(|name| !name.is_empty()),
            app_id: raw.app_id.filter(|app_id| !app_id.is_empty()),
            kind,
            rect: raw.rect,
            visible: raw.visible.unwrap_or(false),
            focused: raw.focused,
            pid: raw.pid.filter(|&pid| pid > 0),
            parent,
            children: ChildList::new(),
            floating: ChildList::new(),
        });

        if self.by_id.insert(raw.id, index).is_some() {
            tracing::warn!("tree: duplicate node id {} in snapshot", raw.id);
        }

        for child in raw.nodes {
            let child = self.insert(child, Some(index), false);
            self.nodes[index.0].children.push(child);
        }
        for child in raw.floating_nodes {
            let child = self.insert(child, Some(index), true);
            self.nodes[index.0].floating.push(child);
        }

        index
    }

    /// Index of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeIndex { NodeIndex(0) }

    /// Number of nodes in the snapshot.
    #[must_use]
    pub const fn len(&self) -> usize { self.nodes.len() }

    /// Check if the snapshot has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Get a node by index.
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&LayoutNode> { self.nodes.get(index.0) }

    /// Look up a node by its window-manager id.
    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<NodeIndex> { self.by_id.get(&id).copied() }

    /// Returns the currently focused node, if the window manager reported one.
    #[must_use]
    pub fn focused(&self) -> Option<NodeIndex> {
        self.nodes.iter().position(|node| node.focused).map(NodeIndex)
    }

    /// Walk from `index` up to the root, starting with `index` itself.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.get(index).map(|_| index), |&current| self[current].parent)
    }

    /// Breadth-first walk over every descendant of `index`, tiled and floating.
    /// `index` itself is not yielded.
    #[must_use]
    pub fn descendants(&self, index: NodeIndex) -> Descendants<'_> {
        Descendants::new(self, index, true)
    }

    /// Breadth-first walk over the tiled subtree below `index`.
    /// Floating children are not followed.
    #[must_use]
    pub fn tiled_descendants(&self, index: NodeIndex) -> Descendants<'_> {
        Descendants::new(self, index, false)
    }
}

impl Index<NodeIndex> for LayoutTree {
    type Output = LayoutNode;

    fn index(&self, index: NodeIndex) -> &Self::Output { &self.nodes[index.0] }
}

/// Maps a wire node type onto a [`NodeKind`].
///
/// sway and i3 report both split containers and client windows as `con`. A
/// `con` that owns tiled children and no process is a split container.
const fn classify(raw: &RawNode, floating: bool) -> NodeKind {
    match raw.node_type {
        RawNodeType::Root => NodeKind::Root,
        RawNodeType::Output => NodeKind::Output,
        RawNodeType::Workspace => NodeKind::Workspace,
        RawNodeType::FloatingCon => NodeKind::FloatingWindowContainer,
        RawNodeType::Con if floating => NodeKind::FloatingWindowContainer,
        RawNodeType::Con if !raw.nodes.is_empty() && raw.pid.is_none() => NodeKind::SplitContainer,
        RawNodeType::Con => NodeKind::WindowContainer,
        RawNodeType::Dockarea | RawNodeType::Unknown => NodeKind::Other,
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Breadth-first iterator over a subtree.
#[derive(Debug)]
pub struct Descendants<'t> {
    tree: &'t LayoutTree,
    queue: VecDeque<NodeIndex>,
    include_floating: bool,
}

impl<'t> Descendants<'t> {
    fn new(tree: &'t LayoutTree, start: NodeIndex, include_floating: bool) -> Self {
        let mut iter = Self {
            tree,
            queue: VecDeque::new(),
            include_floating,
        };
        if tree.get(start).is_some() {
            iter.enqueue_children(start);
        }
        iter
    }

    fn enqueue_children(&mut self, index: NodeIndex) {
        let node = &self.tree[index];
        self.queue.extend(node.children.iter().copied());
        if self.include_floating {
            self.queue.extend(node.floating.iter().copied());
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        self.enqueue_children(index);
        Some(index)
    }
}
