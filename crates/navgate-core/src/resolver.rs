use crate::policy::{Resolution, SidebarPolicy};
use crate::source::AccessSource;

/// Fetches fresh inputs from a source and runs the fallback policy.
///
/// Nothing is cached between calls. A failed fetch is logged and treated as
/// an empty input, which routes the user to the fallback set.
pub struct SidebarResolver<S> {
    source: S,
    policy: SidebarPolicy,
}

impl<S: AccessSource> SidebarResolver<S> {
    pub fn new(source: S, policy: SidebarPolicy) -> Self {
        Self { source, policy }
    }

    pub async fn resolve(&self, user_email: Option<&str>) -> Resolution {
        let user = user_email.map(str::trim).filter(|u| !u.is_empty());
        let snapshot = self.source.snapshot(user).await;
        self.policy.resolve(user, &snapshot.inputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NavError, Result};
    use crate::nav::NavNode;
    use crate::policy::ResolutionState;
    use crate::source::AccessDocument;
    use crate::types::{Assignment, Role, UiItem};
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl AccessSource for FailingSource {
        async fn navigation(&self) -> Result<Vec<NavNode>> {
            Err(NavError::Source("offline".into()))
        }

        async fn roles(&self) -> Result<Vec<Role>> {
            Err(NavError::Source("offline".into()))
        }

        async fn assignments(&self, _user_email: &str) -> Result<Vec<Assignment>> {
            Err(NavError::Source("offline".into()))
        }
    }

    /// Navigation is unavailable, roles and assignments still load.
    struct NavigationDown(AccessDocument);

    #[async_trait]
    impl AccessSource for NavigationDown {
        async fn navigation(&self) -> Result<Vec<NavNode>> {
            Err(NavError::Source("navigation table locked".into()))
        }

        async fn roles(&self) -> Result<Vec<Role>> {
            self.0.roles().await
        }

        async fn assignments(&self, user_email: &str) -> Result<Vec<Assignment>> {
            self.0.assignments(user_email).await
        }
    }

    fn document() -> AccessDocument {
        AccessDocument {
            navigation: vec![],
            roles: vec![Role::new(
                "instructor",
                vec![UiItem::new("Add Course", "/dashboard/course/add")],
            )],
            assignments: vec![Assignment {
                user_email: "instructor@example.com".into(),
                assign_role: vec!["instructor".into()],
            }],
        }
    }

    #[tokio::test]
    async fn resolves_against_master_when_source_has_no_navigation() {
        let resolver = SidebarResolver::new(document(), SidebarPolicy::default());
        let res = resolver.resolve(Some("instructor@example.com")).await;
        assert_eq!(res.state, ResolutionState::Normal);
        let names: Vec<&str> = res.items.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Course", "Profile"]);
        let course = res.items[0].children().unwrap();
        assert_eq!(course.len(), 1);
        assert_eq!(course[0].name, "Add Course");
    }

    #[tokio::test]
    async fn identity_is_trimmed_before_lookup() {
        let resolver = SidebarResolver::new(document(), SidebarPolicy::default());
        let res = resolver.resolve(Some("  instructor@example.com ")).await;
        assert_eq!(res.state, ResolutionState::Normal);
    }

    #[tokio::test]
    async fn unknown_user_gets_fallback() {
        let resolver = SidebarResolver::new(document(), SidebarPolicy::default());
        let res = resolver.resolve(Some("stranger@example.com")).await;
        assert_eq!(res.state, ResolutionState::NoRoles);
        let names: Vec<&str> = res.items.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Dashboard", "Profile"]);
    }

    #[tokio::test]
    async fn failing_source_routes_to_fallback() {
        let resolver = SidebarResolver::new(FailingSource, SidebarPolicy::default());
        let res = resolver.resolve(Some("instructor@example.com")).await;
        assert_eq!(res.state, ResolutionState::NoRoles);
        assert_eq!(res.items.len(), 2);
    }

    #[tokio::test]
    async fn navigation_failure_alone_resolves_against_master() {
        let resolver =
            SidebarResolver::new(NavigationDown(document()), SidebarPolicy::default());
        let res = resolver.resolve(Some("instructor@example.com")).await;
        assert_eq!(res.state, ResolutionState::Normal);
        let names: Vec<&str> = res.items.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Course", "Profile"]);
        assert_eq!(res.items[0].children().unwrap()[0].name, "Add Course");
    }
}
