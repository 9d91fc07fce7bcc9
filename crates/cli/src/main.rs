//! CardVault CLI - Snapshot seeding and validation tools.
//!
//! # Usage
//!
//! ```bash
//! # Write sample snapshot files for local console work
//! cv-cli seed --dir public/Entities
//!
//! # Validate snapshot files against the typed entity model
//! cv-cli check --dir public/Entities
//! ```
//!
//! # Commands
//!
//! - `seed` - Write sample entity snapshots
//! - `check` - Validate entity snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cv-cli")]
#[command(author, version, about = "CardVault CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sample entity snapshots for local console work
    Seed {
        /// Directory to write snapshot files into
        #[arg(short, long, default_value = "public/Entities")]
        dir: PathBuf,

        /// Overwrite snapshot files that already exist
        #[arg(short, long)]
        force: bool,
    },
    /// Validate entity snapshots against the typed entity model
    Check {
        /// Directory containing snapshot files
        #[arg(short, long, default_value = "public/Entities")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed { dir, force } => commands::seed::run(&dir, force).await,
        Commands::Check { dir } => commands::check::run(&dir).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
