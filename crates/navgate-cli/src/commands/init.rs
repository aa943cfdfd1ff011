use anyhow::Result;
use std::path::Path;

use navgate_core::config::{NavgateConfig, SourceKind};
use navgate_store::{AccessStore, SqliteAccessStore};

pub async fn run(base_dir: &Path) -> Result<()> {
    let config_path = NavgateConfig::default_path(base_dir);

    let config = if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        NavgateConfig::load(&config_path)?
    } else {
        let config = NavgateConfig::default_config(base_dir);
        config.save(&config_path)?;
        println!("Created config: {}", config_path.display());
        config
    };

    if config.navgate.source == SourceKind::Sqlite {
        let store = SqliteAccessStore::open(&config.navgate.db_path)?;
        store.migrate().await?;
        store.seed_defaults(&config.policy()?.master).await?;
        println!("Access database ready: {}", config.navgate.db_path);
        println!(
            "  {} navigation nodes, {} roles",
            store.node_count().await?,
            store.list_roles().await?.len()
        );
    }

    println!();
    println!("Next: navgate assign <email> <role>... then navgate resolve <email>");
    Ok(())
}
