use anyhow::Result;
use std::path::Path;

use navgate_store::{AccessStore, StoreError};

use super::{load_config, open_store};

pub async fn run(base_dir: &Path, email: &str, roles: &[String]) -> Result<()> {
    let config = load_config(base_dir)?;
    let store = open_store(&config).await?;

    for role in roles {
        if let Err(StoreError::NotFound(_)) = store.get_role_by_name(role).await {
            tracing::warn!(role = %role, "assigning a role that does not exist; it grants nothing");
        }
    }

    let existing = store.list_assignments(email).await?;
    let record = store.add_assignment(email, roles).await?;
    println!(
        "Assignment #{} for {}: {}",
        record.id,
        record.user_email,
        record.roles.join(", ")
    );
    if let Some(first) = existing.first() {
        println!(
            "Note: assignment #{} ({}) was recorded earlier and stays authoritative.",
            first.id,
            first.roles.join(", ")
        );
    }
    Ok(())
}
