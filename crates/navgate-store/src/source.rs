use async_trait::async_trait;

use navgate_core::{AccessSource, Assignment, NavNode, Role};

use crate::store::{AccessStore, SqliteAccessStore};

/// Serves resolution inputs straight from the access database.
pub struct StoreSource<S = SqliteAccessStore> {
    store: S,
    max_depth: usize,
}

impl<S: AccessStore> StoreSource<S> {
    pub fn new(store: S, max_depth: usize) -> Self {
        Self { store, max_depth }
    }
}

#[async_trait]
impl<S: AccessStore> AccessSource for StoreSource<S> {
    async fn navigation(&self) -> navgate_core::Result<Vec<NavNode>> {
        Ok(self.store.load_navigation(self.max_depth).await?)
    }

    async fn roles(&self) -> navgate_core::Result<Vec<Role>> {
        let roles = self.store.list_roles().await?;
        Ok(roles.into_iter().map(Role::from).collect())
    }

    async fn assignments(&self, user_email: &str) -> navgate_core::Result<Vec<Assignment>> {
        let records = self.store.list_assignments(user_email).await?;
        Ok(records.into_iter().map(Assignment::from).collect())
    }
}
