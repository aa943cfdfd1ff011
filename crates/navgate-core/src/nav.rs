use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NavError, Result};
use crate::icons::{Glyph, resolve_icon};

/// Default bound on navigation nesting accepted by loaders.
pub const DEFAULT_MAX_DEPTH: usize = 16;

const KEY_SEPARATOR: &str = "||";

/// Permission key for a `(name, path)` pair: `name||path`.
pub fn ui_key(name: &str, path: &str) -> String {
    format!("{name}{KEY_SEPARATOR}{path}")
}

/// Node identifier, numeric or textual depending on the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(id) => write!(f, "{id}"),
            NodeId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Int(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::Str(id.to_string())
    }
}

/// Navigation node as delivered by a navigation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    #[serde(
        default,
        rename = "iconName",
        alias = "icon",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

/// Whether a node ever carried a `children` list.
///
/// A `Branch` whose children were all filtered away stays a `Branch` with an
/// empty list; it never collapses into a `Leaf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Branch(Vec<NavNode>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawNode", try_from = "RawNode")]
pub struct NavNode {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    /// Icon name as supplied by the source, kept for round-tripping.
    pub icon_name: Option<String>,
    pub icon: Glyph,
    pub kind: NodeKind,
}

impl NavNode {
    pub fn leaf(id: impl Into<NodeId>, name: &str, path: &str, icon_name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            path: path.to_string(),
            icon_name: Some(icon_name.to_string()),
            icon: resolve_icon(Some(icon_name)),
            kind: NodeKind::Leaf,
        }
    }

    pub fn branch(
        id: impl Into<NodeId>,
        name: &str,
        path: &str,
        icon_name: &str,
        children: Vec<NavNode>,
    ) -> Self {
        Self {
            kind: NodeKind::Branch(children),
            ..Self::leaf(id, name, path, icon_name)
        }
    }

    /// Permission key of this node.
    pub fn key(&self) -> String {
        ui_key(&self.name, &self.path)
    }

    /// Children, or `None` for a leaf.
    pub fn children(&self) -> Option<&[NavNode]> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Branch(children) => Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Copy of this node's own fields with a different `kind`.
    pub fn with_kind(&self, kind: NodeKind) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            icon_name: self.icon_name.clone(),
            icon: self.icon,
            kind,
        }
    }

    /// Convert a raw node, resolving icons and enforcing `max_depth`.
    pub fn from_raw(raw: RawNode, max_depth: usize) -> Result<Self> {
        convert(raw, 1, max_depth)
    }

    pub fn to_raw(&self) -> RawNode {
        RawNode {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            icon_name: self.icon_name.clone(),
            children: self
                .children()
                .map(|children| children.iter().map(NavNode::to_raw).collect()),
        }
    }
}

fn convert(raw: RawNode, depth: usize, max_depth: usize) -> Result<NavNode> {
    if depth > max_depth {
        return Err(NavError::DepthExceeded {
            max: max_depth,
            path: raw.path,
        });
    }
    let kind = match raw.children {
        None => NodeKind::Leaf,
        Some(children) => NodeKind::Branch(
            children
                .into_iter()
                .map(|c| convert(c, depth + 1, max_depth))
                .collect::<Result<Vec<_>>>()?,
        ),
    };
    Ok(NavNode {
        id: raw.id,
        name: raw.name,
        path: raw.path,
        icon: resolve_icon(raw.icon_name.as_deref()),
        icon_name: raw.icon_name,
        kind,
    })
}

/// Convert a raw navigation list into a tree.
pub fn build_tree(raw: Vec<RawNode>, max_depth: usize) -> Result<Vec<NavNode>> {
    raw.into_iter()
        .map(|node| NavNode::from_raw(node, max_depth))
        .collect()
}

/// Raw form of a whole tree.
pub fn to_raw_tree(tree: &[NavNode]) -> Vec<RawNode> {
    tree.iter().map(NavNode::to_raw).collect()
}

impl From<NavNode> for RawNode {
    fn from(node: NavNode) -> Self {
        node.to_raw()
    }
}

impl TryFrom<RawNode> for NavNode {
    type Error = NavError;

    fn try_from(raw: RawNode) -> Result<Self> {
        NavNode::from_raw(raw, DEFAULT_MAX_DEPTH)
    }
}
