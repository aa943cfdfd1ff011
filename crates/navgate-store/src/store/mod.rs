pub mod seed;
pub mod sqlite;
mod tree;

pub use sqlite::SqliteAccessStore;

use async_trait::async_trait;

use navgate_core::NavNode;

use crate::error::StoreError;
use crate::types::*;

#[async_trait]
pub trait AccessStore: Send + Sync {
    // Roles
    async fn create_role(
        &self,
        name: &str,
        description: &str,
        is_system: bool,
    ) -> Result<StoredRole, StoreError>;
    async fn get_role_by_name(&self, name: &str) -> Result<StoredRole, StoreError>;
    async fn list_roles(&self) -> Result<Vec<StoredRole>, StoreError>;
    async fn delete_role(&self, name: &str) -> Result<(), StoreError>;

    // Role UI grants
    async fn grant_ui_item(&self, role: &str, name: &str, path: &str) -> Result<(), StoreError>;
    async fn revoke_ui_item(&self, role: &str, name: &str, path: &str)
    -> Result<(), StoreError>;

    // Assignments
    async fn add_assignment(
        &self,
        user_email: &str,
        roles: &[String],
    ) -> Result<AssignmentRecord, StoreError>;
    async fn list_assignments(&self, user_email: &str)
    -> Result<Vec<AssignmentRecord>, StoreError>;
    async fn remove_assignment(&self, id: i64) -> Result<(), StoreError>;

    // Navigation
    async fn insert_node(
        &self,
        parent_row: Option<i64>,
        position: i64,
        node: &NewNode<'_>,
    ) -> Result<i64, StoreError>;
    async fn move_node(
        &self,
        row: i64,
        parent_row: Option<i64>,
        position: i64,
    ) -> Result<(), StoreError>;
    async fn load_navigation(&self, max_depth: usize) -> Result<Vec<NavNode>, StoreError>;
    async fn node_count(&self) -> Result<u64, StoreError>;

    // Lifecycle
    async fn migrate(&self) -> Result<(), StoreError>;
    /// Seed `master` as the navigation tree (only into an empty table) and
    /// the built-in roles.
    async fn seed_defaults(&self, master: &[NavNode]) -> Result<(), StoreError>;
}
