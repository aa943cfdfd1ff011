use crate::nav::{NavNode, NodeKind};
use crate::permissions::AllowedKeys;

/// Keep the nodes a user may see.
///
/// A node survives when its own key is allowed or when at least one of its
/// descendants survives. Sibling order and the leaf/branch shape of every
/// surviving node are preserved.
pub fn filter_tree(tree: &[NavNode], allowed: &AllowedKeys) -> Vec<NavNode> {
    tree.iter()
        .filter_map(|node| filter_node(node, allowed))
        .collect()
}

fn filter_node(node: &NavNode, allowed: &AllowedKeys) -> Option<NavNode> {
    let kind = match &node.kind {
        NodeKind::Leaf => NodeKind::Leaf,
        NodeKind::Branch(children) => NodeKind::Branch(filter_tree(children, allowed)),
    };
    let has_survivors = matches!(&kind, NodeKind::Branch(children) if !children.is_empty());

    if allowed.permits(node) || has_survivors {
        Some(node.with_kind(kind))
    } else {
        None
    }
}
