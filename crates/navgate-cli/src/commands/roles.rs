use anyhow::Result;
use std::path::Path;

use navgate_store::AccessStore;

use super::{load_config, open_store};

pub async fn run(base_dir: &Path) -> Result<()> {
    let config = load_config(base_dir)?;
    let store = open_store(&config).await?;
    let roles = store.list_roles().await?;

    if roles.is_empty() {
        println!("No roles found. Run `navgate init` to seed the defaults.");
        return Ok(());
    }

    for role in &roles {
        let marker = if role.is_system { " (system)" } else { "" };
        println!("{}{} - {}", role.name, marker, role.description);
        if role.allowed_ui_items.is_empty() {
            println!("    (no UI items)");
        }
        for item in &role.allowed_ui_items {
            println!(
                "    {:<24} {}",
                item.name.as_deref().unwrap_or("?"),
                item.path.as_deref().unwrap_or("?")
            );
        }
    }

    Ok(())
}
