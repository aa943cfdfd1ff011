//! End-to-end sidebar scenarios driven through the public API.
use navgate_core::{
    AccessDocument, AccessInputs, NavNode, ResolutionState, SidebarPolicy, SidebarResolver,
    build_allowed_keys, filter_tree,
};
use std::collections::BTreeSet;

fn course_tree() -> Vec<NavNode> {
    let json = r#"[{"id": 1, "name": "Course", "path": "/course",
                   "children": [{"id": 2, "name": "Add", "path": "/course/add"}]}]"#;
    serde_json::from_str(json).unwrap()
}

fn keys(list: &[&str]) -> navgate_core::AllowedKeys {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn permitted_parent_without_permitted_child_serializes_empty_children() {
    let out = filter_tree(&course_tree(), &keys(&["Course||/course"]));
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": 1, "name": "Course", "path": "/course", "children": []}])
    );
}

#[test]
fn child_permission_keeps_parent_and_child() {
    let out = filter_tree(&course_tree(), &keys(&["Add||/course/add"]));
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": 1, "name": "Course", "path": "/course",
                            "children": [{"id": 2, "name": "Add", "path": "/course/add"}]}])
    );
}

#[test]
fn empty_role_assignment_gives_default_set() {
    let doc = AccessDocument::parse(
        r#"{"roles": [{"name": "admin", "dashboard_access_ui": [{"name": "Course", "path": "/course"}]}],
            "assignments": [{"user_email": "a@example.com", "assign_role": []}]}"#,
    )
    .unwrap();
    let policy = SidebarPolicy::default();
    let inputs = AccessInputs {
        navigation: &course_tree(),
        roles: &doc.roles,
        assignments: &doc.assignments,
    };
    let res = policy.resolve(Some("a@example.com"), &inputs);
    assert_eq!(res.state, ResolutionState::NoRoles);

    let mut expected = policy.default_items.clone();
    expected.extend(policy.extras.clone());
    assert_eq!(res.items, expected);
}

#[test]
fn role_absent_from_catalog_contributes_no_keys() {
    let assigned: BTreeSet<String> = ["Instructor".to_string()].into_iter().collect();
    assert!(build_allowed_keys(&assigned, &[]).is_empty());
}

#[tokio::test]
async fn document_source_resolves_override_tree() {
    let doc = AccessDocument::parse(
        r#"{
            "navigation": [
                {"id": 1, "name": "Course", "path": "/course", "iconName": "course",
                 "children": [{"id": 2, "name": "Add", "path": "/course/add", "iconName": "add"}]},
                {"id": 3, "name": "Users", "path": "/users", "iconName": "users"}
            ],
            "roles": [{"name": "Instructor", "dashboard_access_ui": [{"name": "Add", "path": "/course/add"}]}],
            "assignments": [{"user_email": "t@example.com", "assign_role": ["Instructor"]}]
        }"#,
    )
    .unwrap();
    let resolver = SidebarResolver::new(doc, SidebarPolicy::default());
    let res = resolver.resolve(Some("t@example.com")).await;
    assert_eq!(res.state, ResolutionState::Normal);
    let names: Vec<&str> = res.items.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Course", "Profile"]);
}
