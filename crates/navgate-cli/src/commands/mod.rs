pub mod assign;
pub mod config;
pub mod grant;
pub mod init;
pub mod resolve;
pub mod roles;
pub mod tree;

use anyhow::{Result, bail};
use std::path::Path;

use navgate_core::NavNode;
use navgate_core::config::{NavgateConfig, SourceKind};
use navgate_store::{AccessStore, SqliteAccessStore};

pub fn load_config(base_dir: &Path) -> Result<NavgateConfig> {
    let config_path = NavgateConfig::default_path(base_dir);
    Ok(NavgateConfig::load(&config_path)?)
}

/// Open the access database; refused when roles live in a JSON document.
pub async fn open_store(config: &NavgateConfig) -> Result<SqliteAccessStore> {
    if config.navgate.source == SourceKind::Json {
        bail!(
            "source is \"json\"; edit {} instead",
            config.json_path()?.display()
        );
    }
    let store = SqliteAccessStore::open(&config.navgate.db_path)?;
    store.migrate().await?;
    Ok(store)
}

pub fn print_tree(nodes: &[NavNode], depth: usize) {
    for node in nodes {
        println!(
            "{:indent$}{} {:<24} {}",
            "",
            node.icon,
            node.name,
            node.path,
            indent = depth * 2
        );
        if let Some(children) = node.children() {
            print_tree(children, depth + 1);
        }
    }
}
