use anyhow::Result;
use std::path::Path;

use navgate_core::config::SourceKind;
use navgate_core::{AccessSource, JsonFileSource, SidebarPolicy, SidebarResolver};
use navgate_store::{SqliteAccessStore, StoreSource};

use super::{load_config, print_tree};

pub async fn run(base_dir: &Path, email: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(base_dir)?;
    let policy = config.policy()?;
    let depth = config.navgate.max_depth;

    match config.navgate.source {
        SourceKind::Sqlite => {
            let store = SqliteAccessStore::open(&config.navgate.db_path)?;
            resolve_with(StoreSource::new(store, depth), policy, email, json).await
        }
        SourceKind::Json => {
            let source = JsonFileSource::new(&config.json_path()?, depth);
            resolve_with(source, policy, email, json).await
        }
    }
}

async fn resolve_with<S: AccessSource>(
    source: S,
    policy: SidebarPolicy,
    email: Option<&str>,
    json: bool,
) -> Result<()> {
    let resolver = SidebarResolver::new(source, policy);
    let resolution = resolver.resolve(email).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    println!("User:  {}", email.unwrap_or("(none)"));
    println!("State: {}", resolution.state);
    if resolution.state.is_fallback() {
        println!("       (showing fallback navigation)");
    }
    println!();
    print_tree(&resolution.items, 1);
    Ok(())
}
