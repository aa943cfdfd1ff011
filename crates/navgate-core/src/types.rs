use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::nav::ui_key;

/// A `(name, path)` pair a role grants visibility into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl UiItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            path: Some(path.to_string()),
        }
    }

    /// Permission key, or `None` when either half is missing or empty.
    pub fn key(&self) -> Option<String> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        let path = self.path.as_deref().filter(|p| !p.is_empty())?;
        Some(ui_key(name, path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default, rename = "dashboard_access_ui")]
    pub allowed_ui_items: Vec<UiItem>,
}

impl Role {
    pub fn new(name: &str, items: Vec<UiItem>) -> Self {
        Self {
            name: name.to_string(),
            allowed_ui_items: items,
        }
    }
}

/// One user-to-roles assignment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub user_email: String,
    #[serde(default)]
    pub assign_role: Vec<String>,
}

/// Role names held by a user. Only the first record counts; later records
/// are ignored rather than merged.
pub fn assigned_role_names(records: &[Assignment]) -> BTreeSet<String> {
    records
        .first()
        .map(|r| {
            r.assign_role
                .iter()
                .filter(|name| !name.is_empty())
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_requires_both_halves() {
        assert_eq!(
            UiItem::new("Course", "/course").key().as_deref(),
            Some("Course||/course")
        );
        let no_path = UiItem {
            name: Some("Course".into()),
            path: None,
        };
        assert_eq!(no_path.key(), None);
        let empty_name = UiItem {
            name: Some(String::new()),
            path: Some("/course".into()),
        };
        assert_eq!(empty_name.key(), None);
    }

    #[test]
    fn role_reads_wire_field_name() {
        let json = r#"{"name": "Instructor", "dashboard_access_ui": [{"name": "Course", "path": "/course"}, {"path": "/orphan"}]}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.allowed_ui_items.len(), 2);
        assert_eq!(role.allowed_ui_items[1].name, None);

        let bare: Role = serde_json::from_str(r#"{"name": "Guest"}"#).unwrap();
        assert!(bare.allowed_ui_items.is_empty());
    }

    #[test]
    fn only_first_assignment_counts() {
        let records = vec![
            Assignment {
                user_email: "a@example.com".into(),
                assign_role: vec!["student".into()],
            },
            Assignment {
                user_email: "a@example.com".into(),
                assign_role: vec!["admin".into()],
            },
        ];
        let names = assigned_role_names(&records);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["student"]);
        assert!(assigned_role_names(&[]).is_empty());
    }
}
