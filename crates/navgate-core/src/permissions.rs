use std::collections::{BTreeSet, HashSet};

use crate::nav::{NavNode, ui_key};
use crate::types::Role;

/// Flat set of `name||path` keys a user may see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedKeys(HashSet<String>);

impl AllowedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, name: &str, path: &str) -> bool {
        self.0.contains(&ui_key(name, path))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn permits(&self, node: &NavNode) -> bool {
        self.contains_key(&node.key())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for AllowedKeys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collect the keys granted by every role in `assigned` that exists in `roles`.
///
/// Assigned names with no matching role contribute nothing. Items missing a
/// name or a path are skipped.
pub fn build_allowed_keys(assigned: &BTreeSet<String>, roles: &[Role]) -> AllowedKeys {
    roles
        .iter()
        .filter(|role| assigned.contains(&role.name))
        .flat_map(|role| role.allowed_ui_items.iter())
        .filter_map(|item| item.key())
        .collect()
}
