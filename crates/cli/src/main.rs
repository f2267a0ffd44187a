//! Praxis CLI - inspect the role matrix and exercise access decisions
//!
//! Usage:
//!   praxis roles                                - List the role matrix
//!   praxis check --role doctor financial_access - Evaluate a permission gate
//!   praxis manage admin nurse                   - Management hierarchy check

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use shared::SessionConfig;

use crate::commands::{CheckCommand, ManageCommand, RolesCommand};

mod commands;

#[derive(Parser)]
#[command(name = "praxis")]
#[command(about = "Praxis - session core for clinical practice management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a praxis.json configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the role matrix
    Roles(RolesCommand),
    /// Evaluate an access gate for an actor
    Check(CheckCommand),
    /// Check whether one role may manage another
    Manage(ManageCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Roles(cmd) => cmd.run(config, cli.json),
        Commands::Check(cmd) => cmd.run(config, cli.json),
        Commands::Manage(cmd) => cmd.run(cli.json),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => Ok(SessionConfig::from_file(path)?),
        None => Ok(SessionConfig::default()),
    }
}
