use anyhow::Result;
use std::path::Path;

use navgate_core::config::{NavgateConfig, SourceKind};

pub fn run(base_dir: &Path, pin: bool) -> Result<()> {
    let config_path = NavgateConfig::default_path(base_dir);
    let mut config = NavgateConfig::load(&config_path)?;

    if pin {
        let policy = config.policy()?;
        config.pin_policy(&policy);
        config.save(&config_path)?;
        println!("Pinned effective navigation into {}", config_path.display());
        println!();
    }

    println!("Config: {}", config_path.display());
    println!();
    println!("  Source:         {}", config.navgate.source);
    match config.navgate.source {
        SourceKind::Sqlite => println!("  DB path:        {}", config.navgate.db_path),
        SourceKind::Json => println!(
            "  JSON path:      {}",
            config.navgate.json_path.as_deref().unwrap_or("(not set)")
        ),
    }
    println!("  Max depth:      {}", config.navgate.max_depth);
    println!();

    let describe = |label: &str, count: usize| {
        if count == 0 {
            println!("  {label:<15} built-in");
        } else {
            println!("  {label:<15} {count} configured");
        }
    };
    describe("Master items:", config.master_items.len());
    describe("Default items:", config.default_items.len());
    describe("Extra items:", config.extra_items.len());

    Ok(())
}
