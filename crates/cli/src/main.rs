//! Clementine CLI - store provisioning and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the DynamoDB table
//! clem-cli table create
//!
//! # Seed the catalog with demo products
//! clem-cli seed
//!
//! # Seed against DynamoDB Local
//! DYNAMO_ENDPOINT_URL=http://localhost:8000 clem-cli seed
//! ```
//!
//! # Commands
//!
//! - `table create` - Provision the single-table DynamoDB schema
//! - `seed` - Write a demo catalog through the catalog service
//!
//! # Environment Variables
//!
//! - `CLEMENTINE_TABLE` - DynamoDB table name (required)
//! - `DYNAMO_ENDPOINT_URL` - Endpoint override for DynamoDB Local

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clem-cli")]
#[command(author, version, about = "Clementine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the backing DynamoDB table
    Table {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Seed the catalog with demo products
    Seed,
}

#[derive(Subcommand)]
enum TableAction {
    /// Create the table (no-op if it already exists)
    Create,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Table { action } => match action {
            TableAction::Create => commands::table::create().await?,
        },
        Commands::Seed => commands::seed::catalog().await?,
    }
    Ok(())
}
