use std::collections::{HashMap, HashSet};

use navgate_core::{NavError, NavNode, NodeId, RawNode, build_tree};

/// One row of `nav_nodes`, in sibling order.
#[derive(Debug, Clone)]
pub(crate) struct NodeRow {
    pub row: i64,
    pub parent: Option<i64>,
    pub node_id: String,
    pub name: String,
    pub path: String,
    pub icon_name: Option<String>,
    pub is_branch: bool,
}

pub(crate) fn parse_node_id(raw: &str) -> NodeId {
    raw.parse::<i64>()
        .map(NodeId::Int)
        .unwrap_or_else(|_| NodeId::Str(raw.to_string()))
}

/// Assemble parent-referenced rows into a tree.
///
/// Rows must already be sorted by sibling position. Nesting deeper than
/// `max_depth` fails; rows unreachable from a root can only sit on a parent
/// loop and are reported as a cycle.
pub(crate) fn assemble(rows: &[NodeRow], max_depth: usize) -> Result<Vec<NavNode>, NavError> {
    let mut by_parent: HashMap<Option<i64>, Vec<&NodeRow>> = HashMap::new();
    for row in rows {
        by_parent.entry(row.parent).or_default().push(row);
    }

    let mut visited = HashSet::new();
    let raw = level(&by_parent, None, 1, max_depth, &mut visited)?;

    if let Some(stray) = rows.iter().find(|r| !visited.contains(&r.row)) {
        return Err(NavError::CyclicNavigation(stray.node_id.clone()));
    }
    build_tree(raw, max_depth)
}

fn level(
    by_parent: &HashMap<Option<i64>, Vec<&NodeRow>>,
    parent: Option<i64>,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<i64>,
) -> Result<Vec<RawNode>, NavError> {
    let Some(siblings) = by_parent.get(&parent) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(siblings.len());
    for row in siblings {
        if depth > max_depth {
            return Err(NavError::DepthExceeded {
                max: max_depth,
                path: row.path.clone(),
            });
        }
        if !visited.insert(row.row) {
            return Err(NavError::CyclicNavigation(row.node_id.clone()));
        }
        let has_rows = by_parent.contains_key(&Some(row.row));
        let children = if row.is_branch || has_rows {
            Some(level(by_parent, Some(row.row), depth + 1, max_depth, visited)?)
        } else {
            None
        };
        out.push(RawNode {
            id: parse_node_id(&row.node_id),
            name: row.name.clone(),
            path: row.path.clone(),
            icon_name: row.icon_name.clone(),
            children,
        });
    }
    Ok(out)
}
