use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{NavError, Result};
use crate::nav::{NavNode, RawNode, build_tree};
use crate::policy::AccessInputs;
use crate::types::{Assignment, Role};

/// Inputs fetched for a single resolution. A part that failed to load is
/// left empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessSnapshot {
    pub navigation: Vec<NavNode>,
    pub roles: Vec<Role>,
    pub assignments: Vec<Assignment>,
}

impl AccessSnapshot {
    pub fn inputs(&self) -> AccessInputs<'_> {
        AccessInputs {
            navigation: &self.navigation,
            roles: &self.roles,
            assignments: &self.assignments,
        }
    }
}

/// Supplier of the three resolution inputs.
#[async_trait]
pub trait AccessSource: Send + Sync {
    /// Navigation tree. An empty list means the source has no override.
    async fn navigation(&self) -> Result<Vec<NavNode>>;

    /// Every role with its UI grants.
    async fn roles(&self) -> Result<Vec<Role>>;

    /// Assignment records for one user, oldest first.
    async fn assignments(&self, user_email: &str) -> Result<Vec<Assignment>>;

    /// Fetch everything one resolution needs. Each failed fetch is logged and
    /// treated as empty. Sources backed by a single document override this so
    /// all three parts come from the same read.
    async fn snapshot(&self, user_email: Option<&str>) -> AccessSnapshot {
        let navigation = self.navigation().await.unwrap_or_else(|e| {
            warn!(error = %e, "navigation fetch failed; using master tree");
            Vec::new()
        });
        let roles = self.roles().await.unwrap_or_else(|e| {
            warn!(error = %e, "role fetch failed");
            Vec::new()
        });
        let assignments = match user_email {
            Some(email) => self.assignments(email).await.unwrap_or_else(|e| {
                warn!(user = email, error = %e, "assignment fetch failed");
                Vec::new()
            }),
            None => Vec::new(),
        };
        AccessSnapshot {
            navigation,
            roles,
            assignments,
        }
    }
}

/// JSON document holding all three inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessDocument {
    #[serde(default)]
    pub navigation: Vec<RawNode>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl AccessDocument {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn assignments_for(&self, user_email: &str) -> Vec<Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.user_email == user_email)
            .cloned()
            .collect()
    }
}

/// In-memory document, mostly useful for tests and embedding.
#[async_trait]
impl AccessSource for AccessDocument {
    async fn navigation(&self) -> Result<Vec<NavNode>> {
        build_tree(self.navigation.clone(), crate::nav::DEFAULT_MAX_DEPTH)
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        Ok(self.roles.clone())
    }

    async fn assignments(&self, user_email: &str) -> Result<Vec<Assignment>> {
        Ok(self.assignments_for(user_email))
    }
}

/// Reads an [`AccessDocument`] from disk on every call, so edits to the
/// file show up on the next resolution. A resolution reads the file once.
pub struct JsonFileSource {
    path: PathBuf,
    max_depth: usize,
}

impl JsonFileSource {
    pub fn new(path: &Path, max_depth: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            max_depth,
        }
    }

    async fn load(&self) -> Result<AccessDocument> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            NavError::Source(format!("cannot read {}: {e}", self.path.display()))
        })?;
        AccessDocument::parse(&content)
    }
}

#[async_trait]
impl AccessSource for JsonFileSource {
    async fn navigation(&self) -> Result<Vec<NavNode>> {
        let doc = self.load().await?;
        build_tree(doc.navigation, self.max_depth)
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        Ok(self.load().await?.roles)
    }

    async fn assignments(&self, user_email: &str) -> Result<Vec<Assignment>> {
        Ok(self.load().await?.assignments_for(user_email))
    }

    async fn snapshot(&self, user_email: Option<&str>) -> AccessSnapshot {
        let doc = match self.load().await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "access document unreadable");
                return AccessSnapshot::default();
            }
        };
        let assignments = user_email
            .map(|email| doc.assignments_for(email))
            .unwrap_or_default();
        let navigation = build_tree(doc.navigation, self.max_depth).unwrap_or_else(|e| {
            warn!(error = %e, "navigation rejected; using master tree");
            Vec::new()
        });
        AccessSnapshot {
            navigation,
            roles: doc.roles,
            assignments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "navigation": [
            {"id": 1, "name": "Course", "path": "/course", "iconName": "course",
             "children": [{"id": 2, "name": "Add", "path": "/course/add"}]}
        ],
        "roles": [
            {"name": "instructor", "dashboard_access_ui": [{"name": "Add", "path": "/course/add"}]}
        ],
        "assignments": [
            {"user_email": "b@example.com", "assign_role": ["student"]},
            {"user_email": "a@example.com", "assign_role": ["instructor"]},
            {"user_email": "a@example.com", "assign_role": ["admin"]}
        ]
    }"#;

    #[tokio::test]
    async fn file_source_reads_all_inputs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("access.json");
        std::fs::write(&path, DOC).unwrap();
        let source = JsonFileSource::new(&path, 8);

        let nav = source.navigation().await.unwrap();
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].children().unwrap()[0].name, "Add");

        let roles = source.roles().await.unwrap();
        assert_eq!(roles[0].name, "instructor");

        let records = source.assignments("a@example.com").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].assign_role, vec!["instructor"]);
        assert!(source.assignments("nobody@example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let source = JsonFileSource::new(Path::new("/nonexistent/access.json"), 8);
        assert!(matches!(
            source.roles().await,
            Err(NavError::Source(_))
        ));
    }

    #[tokio::test]
    async fn file_snapshot_comes_from_one_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("access.json");
        std::fs::write(&path, DOC).unwrap();
        let source = JsonFileSource::new(&path, 8);

        let snap = source.snapshot(Some("a@example.com")).await;
        std::fs::write(&path, r#"{"roles": []}"#).unwrap();

        assert_eq!(snap.navigation.len(), 1);
        assert_eq!(snap.roles[0].name, "instructor");
        assert_eq!(snap.assignments.len(), 2);

        let after = source.snapshot(Some("a@example.com")).await;
        assert_eq!(after, AccessSnapshot::default());
    }

    #[tokio::test]
    async fn file_snapshot_keeps_roles_when_navigation_is_too_deep() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("access.json");
        std::fs::write(&path, DOC).unwrap();
        let source = JsonFileSource::new(&path, 1);

        let snap = source.snapshot(Some("a@example.com")).await;
        assert!(snap.navigation.is_empty());
        assert_eq!(snap.roles.len(), 1);
        assert_eq!(snap.assignments[0].assign_role, vec!["instructor"]);
    }

    #[tokio::test]
    async fn missing_file_snapshot_is_empty() {
        let source = JsonFileSource::new(Path::new("/nonexistent/access.json"), 8);
        let snap = source.snapshot(Some("a@example.com")).await;
        assert_eq!(snap, AccessSnapshot::default());
    }

    #[tokio::test]
    async fn anonymous_snapshot_has_no_assignments() {
        let doc = AccessDocument::parse(DOC).unwrap();
        let snap = doc.snapshot(None).await;
        assert!(snap.assignments.is_empty());
        assert_eq!(snap.roles.len(), 1);
    }

    #[tokio::test]
    async fn document_defaults_missing_sections() {
        let doc = AccessDocument::parse(r#"{"roles": []}"#).unwrap();
        assert!(doc.navigation().await.unwrap().is_empty());
        assert!(doc.assignments("a@example.com").await.unwrap().is_empty());
    }
}
