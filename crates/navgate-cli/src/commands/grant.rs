use anyhow::Result;
use std::path::Path;

use navgate_store::{AccessStore, StoreError};

use super::{load_config, open_store};

pub async fn run(base_dir: &Path, role: &str, name: &str, path: &str) -> Result<()> {
    let config = load_config(base_dir)?;
    let store = open_store(&config).await?;

    match store.get_role_by_name(role).await {
        Ok(_) => {}
        Err(StoreError::NotFound(_)) => {
            store.create_role(role, "", false).await?;
            println!("Created role '{role}'");
        }
        Err(e) => return Err(e.into()),
    }

    store.grant_ui_item(role, name, path).await?;
    println!("Granted {name} ({path}) to '{role}'");
    Ok(())
}
