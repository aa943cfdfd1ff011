use tracing::info;

use navgate_core::NavNode;

use crate::error::StoreError;
use crate::store::AccessStore;
use crate::types::NewNode;

const INSTRUCTOR_ITEMS: &[(&str, &str)] = &[
    ("Dashboard", "/dashboard"),
    ("Add Course", "/dashboard/course/add"),
    ("All Courses", "/dashboard/course/list"),
    ("Lessons", "/dashboard/course/lessons"),
    ("Media", "/dashboard/media"),
];

const STUDENT_ITEMS: &[(&str, &str)] = &[
    ("Dashboard", "/dashboard"),
    ("All Courses", "/dashboard/course/list"),
];

/// Seed the master navigation and the built-in roles. Safe to run repeatedly.
/// `admin` is granted every item of `master`.
pub async fn seed_defaults(
    store: &dyn AccessStore,
    master: &[NavNode],
) -> Result<(), StoreError> {
    if store.node_count().await? == 0 {
        let inserted = seed_navigation(store, master).await?;
        info!(nodes = inserted, "seeded master navigation");
    }

    let roles = [
        ("admin", "Every dashboard section"),
        ("instructor", "Course authoring and media"),
        ("student", "Own dashboard and course list"),
    ];

    let admin_items = all_items(master);

    for (name, desc) in &roles {
        let role = match store.get_role_by_name(name).await {
            Ok(r) => r,
            Err(StoreError::NotFound(_)) => store.create_role(name, desc, true).await?,
            Err(e) => return Err(e),
        };

        let items: Vec<(String, String)> = match *name {
            "admin" => admin_items.clone(),
            "instructor" => owned(INSTRUCTOR_ITEMS),
            "student" => owned(STUDENT_ITEMS),
            _ => Vec::new(),
        };

        for (item_name, item_path) in &items {
            store.grant_ui_item(&role.name, item_name, item_path).await?;
        }
    }

    Ok(())
}

async fn seed_navigation(store: &dyn AccessStore, tree: &[NavNode]) -> Result<usize, StoreError> {
    let mut pending: Vec<(Option<i64>, &[NavNode])> = vec![(None, tree)];
    let mut inserted = 0;

    while let Some((parent, level)) = pending.pop() {
        for (position, node) in level.iter().enumerate() {
            let node_id = node.id.to_string();
            let row = store
                .insert_node(
                    parent,
                    position as i64,
                    &NewNode {
                        node_id: &node_id,
                        name: &node.name,
                        path: &node.path,
                        icon_name: node.icon_name.as_deref(),
                        is_branch: !node.is_leaf(),
                    },
                )
                .await?;
            inserted += 1;
            if let Some(children) = node.children() {
                pending.push((Some(row), children));
            }
        }
    }

    Ok(inserted)
}

fn all_items(tree: &[NavNode]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut stack: Vec<&NavNode> = tree.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push((node.name.clone(), node.path.clone()));
        if let Some(children) = node.children() {
            stack.extend(children.iter().rev());
        }
    }
    out
}

fn owned(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(n, p)| (n.to_string(), p.to_string()))
        .collect()
}
