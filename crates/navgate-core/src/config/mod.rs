use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{NavError, Result};
use crate::nav::{DEFAULT_MAX_DEPTH, NavNode, RawNode, build_tree, to_raw_tree};
use crate::policy::SidebarPolicy;

/// Top-level navgate configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavgateConfig {
    pub navgate: NavgateSettings,
    /// Shown when a user cannot be resolved. Empty means the built-in set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_items: Vec<RawNode>,
    /// Appended to every sidebar. Empty means the built-in Profile entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_items: Vec<RawNode>,
    /// Master navigation. Empty means the built-in course-platform tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub master_items: Vec<RawNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavgateSettings {
    /// Path to the SQLite access database.
    pub db_path: String,
    /// Where roles, assignments and navigation come from.
    #[serde(default)]
    pub source: SourceKind,
    /// JSON access document (for `source = "json"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    /// Maximum navigation nesting accepted when loading trees.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sqlite,
    Json,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sqlite => write!(f, "sqlite"),
            SourceKind::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(SourceKind::Sqlite),
            "json" | "file" => Ok(SourceKind::Json),
            _ => Err(NavError::InvalidSourceType(s.to_string())),
        }
    }
}

impl NavgateConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NavError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| NavError::TomlDe(e.to_string()))
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| NavError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `navgate init`.
    pub fn default_config(base_dir: &Path) -> Self {
        Self {
            navgate: NavgateSettings {
                db_path: base_dir.join("navgate.db").display().to_string(),
                source: SourceKind::Sqlite,
                json_path: None,
                max_depth: DEFAULT_MAX_DEPTH,
            },
            default_items: vec![],
            extra_items: vec![],
            master_items: vec![],
        }
    }

    /// Build the sidebar policy, substituting built-in sets for empty lists.
    pub fn policy(&self) -> Result<SidebarPolicy> {
        let depth = self.navgate.max_depth;
        Ok(SidebarPolicy::new(
            or_builtin(&self.master_items, depth, defaults::master_navigation)?,
            or_builtin(&self.default_items, depth, defaults::default_navigation)?,
            or_builtin(&self.extra_items, depth, defaults::fixed_extras)?,
        ))
    }

    /// Write the effective policy back into the item lists.
    pub fn pin_policy(&mut self, policy: &SidebarPolicy) {
        self.master_items = to_raw_tree(&policy.master);
        self.default_items = to_raw_tree(&policy.default_items);
        self.extra_items = to_raw_tree(&policy.extras);
    }

    /// JSON access document path, required when `source = "json"`.
    pub fn json_path(&self) -> Result<PathBuf> {
        self.navgate
            .json_path
            .as_ref()
            .map(PathBuf::from)
            .ok_or_else(|| NavError::Config("json_path is required for source = \"json\"".into()))
    }

    /// Resolve the config file path: `<base_dir>/navgate.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("navgate.toml")
    }

    /// Resolve the default navgate home directory: `~/.navgate`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".navgate"))
            .ok_or_else(|| NavError::Config("Cannot determine home directory".to_string()))
    }
}

fn or_builtin(
    items: &[RawNode],
    max_depth: usize,
    builtin: fn() -> Vec<NavNode>,
) -> Result<Vec<NavNode>> {
    if items.is_empty() {
        Ok(builtin())
    } else {
        build_tree(items.to_vec(), max_depth)
    }
}
