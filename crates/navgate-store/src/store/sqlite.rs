use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use navgate_core::{NavNode, UiItem};

use super::AccessStore;
use super::tree::{NodeRow, assemble};
use crate::error::StoreError;
use crate::types::*;

pub struct SqliteAccessStore {
    conn: Mutex<Connection>,
}

impl SqliteAccessStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Internal(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self::new(conn))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Internal("connection lock poisoned".into()))
    }
}

const MIGRATE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS nav_roles (
    id TEXT PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    is_system INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS nav_role_ui_items (
    role_id TEXT NOT NULL REFERENCES nav_roles(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    path TEXT NOT NULL,
    PRIMARY KEY (role_id, name, path)
);

CREATE TABLE IF NOT EXISTS nav_assignments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_email TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_nav_assignments_email ON nav_assignments(user_email);

CREATE TABLE IF NOT EXISTS nav_assignment_roles (
    assignment_id INTEGER NOT NULL REFERENCES nav_assignments(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    role_name TEXT NOT NULL,
    PRIMARY KEY (assignment_id, role_name)
);

CREATE TABLE IF NOT EXISTS nav_nodes (
    row_id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_row INTEGER REFERENCES nav_nodes(row_id) ON DELETE CASCADE,
    position INTEGER NOT NULL DEFAULT 0,
    node_id TEXT NOT NULL,
    name TEXT NOT NULL,
    path TEXT NOT NULL,
    icon_name TEXT,
    is_branch INTEGER NOT NULL DEFAULT 0
);
"#;

fn map_role_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRole> {
    Ok(StoredRole {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        is_system: row.get::<_, i32>(3)? != 0,
        allowed_ui_items: Vec::new(),
        created_at: row.get(4)?,
    })
}

fn load_items(conn: &Connection, role_id: &str) -> Result<Vec<UiItem>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name, path FROM nav_role_ui_items WHERE role_id = ?1 ORDER BY rowid",
    )?;
    let items = stmt
        .query_map([role_id], |row| {
            Ok(UiItem {
                name: Some(row.get(0)?),
                path: Some(row.get(1)?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

fn role_id(conn: &Connection, name: &str) -> Result<String, StoreError> {
    conn.query_row("SELECT id FROM nav_roles WHERE name = ?1", [name], |row| {
        row.get(0)
    })
    .optional()?
    .ok_or_else(|| StoreError::NotFound(format!("role '{name}' not found")))
}

#[async_trait]
impl AccessStore for SqliteAccessStore {
    async fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(MIGRATE_SQL)?;
        Ok(())
    }

    async fn seed_defaults(&self, master: &[NavNode]) -> Result<(), StoreError> {
        super::seed::seed_defaults(self, master).await
    }

    // --- Roles ---

    async fn create_role(
        &self,
        name: &str,
        description: &str,
        is_system: bool,
    ) -> Result<StoredRole, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidInput("role name must not be empty".into()));
        }
        {
            let conn = self.conn()?;
            let id = uuid::Uuid::now_v7().to_string();
            conn.execute(
                "INSERT INTO nav_roles (id, name, description, is_system) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, name, description, is_system as i32],
            )
            .map_err(|e| {
                if let rusqlite::Error::SqliteFailure(ref err, _) = e {
                    if err.extended_code == 2067 {
                        return StoreError::Duplicate(format!("role '{name}' already exists"));
                    }
                }
                StoreError::Database(e.to_string())
            })?;
            info!(role = name, "created role");
        }
        self.get_role_by_name(name).await
    }

    async fn get_role_by_name(&self, name: &str) -> Result<StoredRole, StoreError> {
        let conn = self.conn()?;
        let mut role = conn
            .query_row(
                "SELECT id, name, description, is_system, created_at FROM nav_roles WHERE name = ?1",
                [name],
                map_role_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    StoreError::NotFound(format!("role '{name}' not found"))
                }
                _ => StoreError::Database(e.to_string()),
            })?;
        role.allowed_ui_items = load_items(&conn, &role.id)?;
        Ok(role)
    }

    async fn list_roles(&self) -> Result<Vec<StoredRole>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, is_system, created_at FROM nav_roles ORDER BY name",
        )?;
        let mut roles = stmt
            .query_map([], map_role_row)?
            .collect::<Result<Vec<_>, _>>()?;
        for role in &mut roles {
            role.allowed_ui_items = load_items(&conn, &role.id)?;
        }
        Ok(roles)
    }

    async fn delete_role(&self, name: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let is_system: bool = conn
            .query_row(
                "SELECT is_system FROM nav_roles WHERE name = ?1",
                [name],
                |row| row.get::<_, i32>(0),
            )
            .map(|v| v != 0)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    StoreError::NotFound(format!("role '{name}' not found"))
                }
                _ => StoreError::Database(e.to_string()),
            })?;
        if is_system {
            return Err(StoreError::Forbidden(format!("cannot delete system role '{name}'")));
        }
        conn.execute("DELETE FROM nav_roles WHERE name = ?1", [name])?;
        Ok(())
    }

    // --- Role UI grants ---

    async fn grant_ui_item(&self, role: &str, name: &str, path: &str) -> Result<(), StoreError> {
        if name.is_empty() || path.is_empty() {
            return Err(StoreError::InvalidInput("UI item needs a name and a path".into()));
        }
        let conn = self.conn()?;
        let id = role_id(&conn, role)?;
        conn.execute(
            "INSERT OR IGNORE INTO nav_role_ui_items (role_id, name, path) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, name, path],
        )?;
        Ok(())
    }

    async fn revoke_ui_item(&self, role: &str, name: &str, path: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let id = role_id(&conn, role)?;
        let changed = conn.execute(
            "DELETE FROM nav_role_ui_items WHERE role_id = ?1 AND name = ?2 AND path = ?3",
            rusqlite::params![id, name, path],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!(
                "role '{role}' has no grant for {name} ({path})"
            )));
        }
        Ok(())
    }

    // --- Assignments ---

    async fn add_assignment(
        &self,
        user_email: &str,
        roles: &[String],
    ) -> Result<AssignmentRecord, StoreError> {
        let email = user_email.trim();
        if email.is_empty() {
            return Err(StoreError::InvalidInput("user email must not be empty".into()));
        }
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("INSERT INTO nav_assignments (user_email) VALUES (?1)", [email])?;
        let id = tx.last_insert_rowid();
        for (position, role) in roles.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO nav_assignment_roles (assignment_id, position, role_name)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![id, position as i64, role],
            )?;
        }
        let created_at: String = tx.query_row(
            "SELECT created_at FROM nav_assignments WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;
        tx.commit()?;

        let mut seen = std::collections::HashSet::new();
        Ok(AssignmentRecord {
            id,
            user_email: email.to_string(),
            roles: roles.iter().filter(|r| seen.insert(*r)).cloned().collect(),
            created_at,
        })
    }

    async fn list_assignments(
        &self,
        user_email: &str,
    ) -> Result<Vec<AssignmentRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_email, created_at FROM nav_assignments
             WHERE user_email = ?1 ORDER BY id",
        )?;
        let mut records = stmt
            .query_map([user_email.trim()], |row| {
                Ok(AssignmentRecord {
                    id: row.get(0)?,
                    user_email: row.get(1)?,
                    roles: Vec::new(),
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut roles_stmt = conn.prepare(
            "SELECT role_name FROM nav_assignment_roles WHERE assignment_id = ?1 ORDER BY position",
        )?;
        for record in &mut records {
            record.roles = roles_stmt
                .query_map([record.id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
        }
        Ok(records)
    }

    async fn remove_assignment(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM nav_assignments WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("assignment {id} not found")));
        }
        Ok(())
    }

    // --- Navigation ---

    async fn insert_node(
        &self,
        parent_row: Option<i64>,
        position: i64,
        node: &NewNode<'_>,
    ) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        if let Some(parent) = parent_row {
            let is_branch: Option<i32> = conn
                .query_row(
                    "SELECT is_branch FROM nav_nodes WHERE row_id = ?1",
                    [parent],
                    |row| row.get(0),
                )
                .optional()?;
            match is_branch {
                None => return Err(StoreError::NotFound(format!("node row {parent} not found"))),
                Some(0) => {
                    conn.execute(
                        "UPDATE nav_nodes SET is_branch = 1 WHERE row_id = ?1",
                        [parent],
                    )?;
                }
                Some(_) => {}
            }
        }
        conn.execute(
            "INSERT INTO nav_nodes (parent_row, position, node_id, name, path, icon_name, is_branch)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                parent_row,
                position,
                node.node_id,
                node.name,
                node.path,
                node.icon_name,
                node.is_branch as i32
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn move_node(
        &self,
        row: i64,
        parent_row: Option<i64>,
        position: i64,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        // Walk up from the new parent; meeting `row` means the move would loop.
        let mut cursor = parent_row;
        let mut steps = 0usize;
        while let Some(current) = cursor {
            if current == row {
                return Err(StoreError::InvalidInput(format!(
                    "cannot move node row {row} under its own descendant"
                )));
            }
            steps += 1;
            if steps > 10_000 {
                return Err(StoreError::Internal("navigation parent chain does not end".into()));
            }
            cursor = conn
                .query_row(
                    "SELECT parent_row FROM nav_nodes WHERE row_id = ?1",
                    [current],
                    |r| r.get::<_, Option<i64>>(0),
                )
                .optional()?
                .ok_or_else(|| StoreError::NotFound(format!("node row {current} not found")))?;
        }

        let changed = conn.execute(
            "UPDATE nav_nodes SET parent_row = ?1, position = ?2 WHERE row_id = ?3",
            rusqlite::params![parent_row, position, row],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("node row {row} not found")));
        }
        if let Some(parent) = parent_row {
            conn.execute("UPDATE nav_nodes SET is_branch = 1 WHERE row_id = ?1", [parent])?;
        }
        Ok(())
    }

    async fn load_navigation(&self, max_depth: usize) -> Result<Vec<NavNode>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT row_id, parent_row, node_id, name, path, icon_name, is_branch
             FROM nav_nodes ORDER BY position, row_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(NodeRow {
                    row: row.get(0)?,
                    parent: row.get(1)?,
                    node_id: row.get(2)?,
                    name: row.get(3)?,
                    path: row.get(4)?,
                    icon_name: row.get(5)?,
                    is_branch: row.get::<_, i32>(6)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assemble(&rows, max_depth)?)
    }

    async fn node_count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM nav_nodes", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navgate_core::{DEFAULT_MAX_DEPTH, NavError};

    async fn store() -> SqliteAccessStore {
        let store = SqliteAccessStore::open_in_memory().unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn node<'a>(id: &'a str, name: &'a str, path: &'a str) -> NewNode<'a> {
        NewNode {
            node_id: id,
            name,
            path,
            icon_name: None,
            is_branch: false,
        }
    }

    #[tokio::test]
    async fn role_grants_roundtrip() {
        let store = store().await;
        store.create_role("editor", "Edits posts", false).await.unwrap();
        store.grant_ui_item("editor", "Blog", "/blog").await.unwrap();
        store.grant_ui_item("editor", "Add Post", "/blog/add").await.unwrap();
        store.grant_ui_item("editor", "Blog", "/blog").await.unwrap();

        let role = store.get_role_by_name("editor").await.unwrap();
        assert_eq!(
            role.allowed_ui_items,
            vec![UiItem::new("Blog", "/blog"), UiItem::new("Add Post", "/blog/add")]
        );

        store.revoke_ui_item("editor", "Blog", "/blog").await.unwrap();
        let role = store.get_role_by_name("editor").await.unwrap();
        assert_eq!(role.allowed_ui_items.len(), 1);
        assert!(matches!(
            store.revoke_ui_item("editor", "Blog", "/blog").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_role_is_rejected() {
        let store = store().await;
        store.create_role("editor", "", false).await.unwrap();
        assert!(matches!(
            store.create_role("editor", "", false).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn system_roles_cannot_be_deleted() {
        let store = store().await;
        store.create_role("admin", "", true).await.unwrap();
        store.create_role("temp", "", false).await.unwrap();
        assert!(matches!(
            store.delete_role("admin").await,
            Err(StoreError::Forbidden(_))
        ));
        store.delete_role("temp").await.unwrap();
        assert!(matches!(
            store.get_role_by_name("temp").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn grant_on_unknown_role_fails() {
        let store = store().await;
        assert!(matches!(
            store.grant_ui_item("ghost", "A", "/a").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn assignments_are_listed_oldest_first() {
        let store = store().await;
        store
            .add_assignment("a@example.com", &["student".into(), "student".into()])
            .await
            .unwrap();
        store
            .add_assignment("a@example.com", &["admin".into()])
            .await
            .unwrap();
        store
            .add_assignment("b@example.com", &["instructor".into()])
            .await
            .unwrap();

        let records = store.list_assignments("a@example.com").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].roles, vec!["student"]);
        assert_eq!(records[1].roles, vec!["admin"]);

        store.remove_assignment(records[0].id).await.unwrap();
        let records = store.list_assignments("a@example.com").await.unwrap();
        assert_eq!(records[0].roles, vec!["admin"]);
    }

    #[tokio::test]
    async fn empty_email_is_rejected() {
        let store = store().await;
        assert!(matches!(
            store.add_assignment("  ", &[]).await,
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn nodes_load_as_tree_in_position_order() {
        let store = store().await;
        let course = store
            .insert_node(None, 0, &node("1", "Course", "/course"))
            .await
            .unwrap();
        store
            .insert_node(Some(course), 1, &node("3", "List", "/course/list"))
            .await
            .unwrap();
        store
            .insert_node(Some(course), 0, &node("2", "Add", "/course/add"))
            .await
            .unwrap();
        store
            .insert_node(None, 1, &node("4", "Media", "/media"))
            .await
            .unwrap();

        let tree = store.load_navigation(DEFAULT_MAX_DEPTH).await.unwrap();
        assert_eq!(tree.len(), 2);
        let children: Vec<&str> = tree[0]
            .children()
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(children, vec!["Add", "List"]);
        assert!(tree[1].is_leaf());
    }

    #[tokio::test]
    async fn moving_a_node_under_its_descendant_is_refused() {
        let store = store().await;
        let a = store.insert_node(None, 0, &node("a", "A", "/a")).await.unwrap();
        let b = store.insert_node(Some(a), 0, &node("b", "B", "/b")).await.unwrap();
        assert!(matches!(
            store.move_node(a, Some(b), 0).await,
            Err(StoreError::InvalidInput(_))
        ));
        store.move_node(b, None, 1).await.unwrap();
        let tree = store.load_navigation(DEFAULT_MAX_DEPTH).await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children().map(|c| c.len()), Some(0));
    }

    #[tokio::test]
    async fn loop_written_behind_the_store_is_detected_on_load() {
        let store = store().await;
        let a = store.insert_node(None, 0, &node("a", "A", "/a")).await.unwrap();
        let b = store.insert_node(Some(a), 0, &node("b", "B", "/b")).await.unwrap();
        let c = store.insert_node(Some(b), 0, &node("c", "C", "/c")).await.unwrap();
        {
            let conn = store.conn().unwrap();
            conn.execute(
                "UPDATE nav_nodes SET parent_row = ?1 WHERE row_id = ?2",
                rusqlite::params![c, b],
            )
            .unwrap();
        }
        let err = store.load_navigation(DEFAULT_MAX_DEPTH).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Navigation(NavError::CyclicNavigation(_))
        ));
    }
}
