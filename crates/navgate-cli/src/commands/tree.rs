use anyhow::Result;
use std::path::Path;

use navgate_core::AccessSource;
use navgate_core::config::SourceKind;
use navgate_core::JsonFileSource;
use navgate_store::{SqliteAccessStore, StoreSource};

use super::{load_config, print_tree};

pub async fn run(base_dir: &Path) -> Result<()> {
    let config = load_config(base_dir)?;
    let policy = config.policy()?;
    let depth = config.navgate.max_depth;

    let navigation = match config.navgate.source {
        SourceKind::Sqlite => {
            let store = SqliteAccessStore::open(&config.navgate.db_path)?;
            StoreSource::new(store, depth).navigation().await?
        }
        SourceKind::Json => {
            JsonFileSource::new(&config.json_path()?, depth)
                .navigation()
                .await?
        }
    };

    if navigation.is_empty() {
        println!("Source has no navigation; built-in master tree:");
        print_tree(&policy.master, 1);
    } else {
        println!("Navigation from {} source:", config.navgate.source);
        print_tree(&navigation, 1);
    }
    Ok(())
}
