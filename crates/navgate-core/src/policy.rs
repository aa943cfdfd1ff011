use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::defaults;
use crate::filter::filter_tree;
use crate::nav::NavNode;
use crate::permissions::build_allowed_keys;
use crate::types::{Assignment, Role, assigned_role_names};

/// Which row of the fallback table produced a sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    NoIdentity,
    NoRoles,
    NoPermissions,
    FilteredEmpty,
    Normal,
}

impl ResolutionState {
    pub fn is_fallback(self) -> bool {
        self != ResolutionState::Normal
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionState::NoIdentity => write!(f, "no_identity"),
            ResolutionState::NoRoles => write!(f, "no_roles"),
            ResolutionState::NoPermissions => write!(f, "no_permissions"),
            ResolutionState::FilteredEmpty => write!(f, "filtered_empty"),
            ResolutionState::Normal => write!(f, "normal"),
        }
    }
}

/// Resolved sidebar for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub state: ResolutionState,
    pub items: Vec<NavNode>,
}

/// Inputs for a single resolution, as supplied by the data collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessInputs<'a> {
    /// Navigation supplied by the source. Empty means "use the master tree".
    pub navigation: &'a [NavNode],
    pub roles: &'a [Role],
    /// Assignment records for the user, oldest first.
    pub assignments: &'a [Assignment],
}

/// The master tree, the fallback set and the always-appended extras.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarPolicy {
    pub master: Vec<NavNode>,
    pub default_items: Vec<NavNode>,
    pub extras: Vec<NavNode>,
}

impl Default for SidebarPolicy {
    fn default() -> Self {
        Self {
            master: defaults::master_navigation(),
            default_items: defaults::default_navigation(),
            extras: defaults::fixed_extras(),
        }
    }
}

impl SidebarPolicy {
    pub fn new(master: Vec<NavNode>, default_items: Vec<NavNode>, extras: Vec<NavNode>) -> Self {
        Self {
            master,
            default_items,
            extras,
        }
    }

    /// Resolve the sidebar for `user`. First matching row wins:
    /// no identity, no roles, no permissions, empty filter result, normal.
    /// Extras are appended in every case.
    pub fn resolve(&self, user: Option<&str>, inputs: &AccessInputs<'_>) -> Resolution {
        let (state, mut items) = self.decide(user, inputs);
        debug!(
            user = user.unwrap_or(""),
            %state,
            items = items.len(),
            "resolved sidebar"
        );
        items.extend(self.extras.iter().cloned());
        Resolution { state, items }
    }

    fn decide(
        &self,
        user: Option<&str>,
        inputs: &AccessInputs<'_>,
    ) -> (ResolutionState, Vec<NavNode>) {
        if user.map(str::trim).is_none_or(str::is_empty) {
            return (ResolutionState::NoIdentity, self.default_items.clone());
        }

        let role_names = assigned_role_names(inputs.assignments);
        if role_names.is_empty() {
            return (ResolutionState::NoRoles, self.default_items.clone());
        }

        let allowed = build_allowed_keys(&role_names, inputs.roles);
        if allowed.is_empty() {
            return (ResolutionState::NoPermissions, self.default_items.clone());
        }

        let tree = self.navigation_for(inputs);
        let filtered = filter_tree(tree, &allowed);
        if filtered.is_empty() {
            return (ResolutionState::FilteredEmpty, self.default_items.clone());
        }

        (ResolutionState::Normal, filtered)
    }

    fn navigation_for<'a>(&'a self, inputs: &AccessInputs<'a>) -> &'a [NavNode] {
        if inputs.navigation.is_empty() {
            &self.master
        } else {
            inputs.navigation
        }
    }
}
