pub mod config;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod icons;
pub mod nav;
pub mod permissions;
pub mod policy;
pub mod resolver;
pub mod source;
pub mod types;

pub use error::{NavError, Result};
pub use filter::filter_tree;
pub use icons::{DEFAULT_GLYPH, Glyph, resolve_icon};
pub use nav::{DEFAULT_MAX_DEPTH, NavNode, NodeId, NodeKind, RawNode, build_tree, ui_key};
pub use permissions::{AllowedKeys, build_allowed_keys};
pub use policy::{AccessInputs, Resolution, ResolutionState, SidebarPolicy};
pub use resolver::SidebarResolver;
pub use source::{AccessDocument, AccessSnapshot, AccessSource, JsonFileSource};
pub use types::{Assignment, Role, UiItem, assigned_role_names};
