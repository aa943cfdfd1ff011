use serde::Serialize;

use navgate_core::{Assignment, Role, UiItem};

#[derive(Debug, Clone, Serialize)]
pub struct StoredRole {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub allowed_ui_items: Vec<UiItem>,
    pub created_at: String,
}

impl From<StoredRole> for Role {
    fn from(r: StoredRole) -> Self {
        Role {
            name: r.name,
            allowed_ui_items: r.allowed_ui_items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRecord {
    pub id: i64,
    pub user_email: String,
    pub roles: Vec<String>,
    pub created_at: String,
}

impl From<AssignmentRecord> for Assignment {
    fn from(r: AssignmentRecord) -> Self {
        Assignment {
            user_email: r.user_email,
            assign_role: r.roles,
        }
    }
}

/// Fields of one stored navigation node; nesting comes from `parent_row`.
#[derive(Debug, Clone)]
pub struct NewNode<'a> {
    pub node_id: &'a str,
    pub name: &'a str,
    pub path: &'a str,
    pub icon_name: Option<&'a str>,
    pub is_branch: bool,
}
