mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navgate")]
#[command(about = "Role-filtered dashboard sidebar resolver")]
#[command(version)]
struct Cli {
    /// Path to the navgate config directory (default: ~/.navgate)
    #[arg(long, global = true, env = "NAVGATE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration and seed the access database
    Init,

    /// Resolve the sidebar a user would see
    Resolve {
        /// User email; omit to see the anonymous fallback
        email: Option<String>,
        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// List roles and the UI items they grant
    Roles,

    /// Grant a UI item to a role (the role is created if missing)
    Grant {
        role: String,
        /// Display name of the navigation item
        name: String,
        /// Route of the navigation item
        path: String,
    },

    /// Record a role assignment for a user
    Assign {
        email: String,
        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Print the master navigation tree
    Tree,

    /// Show current configuration
    Config {
        /// Write the effective item lists (built-ins included) into the config file
        #[arg(long)]
        pin: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("navgate=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => navgate_core::config::NavgateConfig::default_base_dir()?,
    };

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => rt.block_on(commands::init::run(&base_dir)),
        Commands::Resolve { ref email, json } => {
            rt.block_on(commands::resolve::run(&base_dir, email.as_deref(), json))
        }
        Commands::Roles => rt.block_on(commands::roles::run(&base_dir)),
        Commands::Grant {
            ref role,
            ref name,
            ref path,
        } => rt.block_on(commands::grant::run(&base_dir, role, name, path)),
        Commands::Assign {
            ref email,
            ref roles,
        } => rt.block_on(commands::assign::run(&base_dir, email, roles)),
        Commands::Tree => rt.block_on(commands::tree::run(&base_dir)),
        Commands::Config { pin } => commands::config::run(&base_dir, pin),
    }
}
