//! Built-in navigation sets used when nothing is configured.

use crate::nav::NavNode;

/// Full dashboard navigation of the course platform.
pub fn master_navigation() -> Vec<NavNode> {
    vec![
        NavNode::leaf(1, "Dashboard", "/dashboard", "dashboard"),
        NavNode::branch(
            2,
            "Course",
            "/dashboard/course",
            "course",
            vec![
                NavNode::leaf(21, "Add Course", "/dashboard/course/add", "add"),
                NavNode::leaf(22, "All Courses", "/dashboard/course/list", "list"),
                NavNode::leaf(23, "Lessons", "/dashboard/course/lessons", "lesson"),
            ],
        ),
        NavNode::branch(
            3,
            "Blog",
            "/dashboard/blog",
            "blog",
            vec![
                NavNode::leaf(31, "Add Post", "/dashboard/blog/add", "add"),
                NavNode::leaf(32, "All Posts", "/dashboard/blog/list", "list"),
            ],
        ),
        NavNode::leaf(4, "Media", "/dashboard/media", "media"),
        NavNode::leaf(5, "Pages", "/dashboard/pages", "page"),
        NavNode::branch(
            6,
            "Users",
            "/dashboard/users",
            "users",
            vec![
                NavNode::leaf(61, "All Users", "/dashboard/users/list", "list"),
                NavNode::leaf(62, "Roles", "/dashboard/users/roles", "roles"),
                NavNode::leaf(63, "Assign Roles", "/dashboard/users/assign", "user"),
            ],
        ),
        NavNode::leaf(7, "Payments", "/dashboard/payments", "payment"),
        NavNode::leaf(8, "Reports", "/dashboard/reports", "chart"),
        NavNode::leaf(9, "Settings", "/dashboard/settings", "settings"),
    ]
}

/// Minimal navigation shown when nothing can be resolved for a user.
pub fn default_navigation() -> Vec<NavNode> {
    vec![NavNode::leaf(1, "Dashboard", "/dashboard", "dashboard")]
}

/// Items appended to every resolved sidebar.
pub fn fixed_extras() -> Vec<NavNode> {
    vec![NavNode::leaf("profile", "Profile", "/dashboard/profile", "profile")]
}
