// ABOUTME: Exercise catalog seeder for the FitFam database
// ABOUTME: Inserts the built-in catalog when empty, or replaces it with --replace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Exercise catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed only when the catalog is empty
//! cargo run --bin seed-catalog
//!
//! # Drop existing catalog rows and reseed
//! cargo run --bin seed-catalog -- --replace
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use fitfam_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "FitFam exercise catalog seeder",
    long_about = "Populate the available_exercises table with the built-in catalog"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Replace existing catalog rows instead of seeding only when empty
    #[arg(long)]
    replace: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    logging::init_from_env()?;

    let url = match args.database_url {
        Some(url) => DatabaseUrl::parse_url(&url).context("Invalid --database-url value")?,
        None => ServerConfig::from_env()?.database.url,
    };
    let database = Database::new(&url).await?;
    let catalog = database.catalog();

    let inserted = if args.replace {
        catalog
            .replace_with_defaults()
            .await
            .context("Failed to replace exercise catalog")?
    } else {
        catalog
            .seed_if_empty()
            .await
            .context("Failed to seed exercise catalog")?
    };

    if inserted == 0 {
        info!("Catalog already populated; nothing to do (use --replace to reseed)");
    } else {
        info!(count = inserted, "Exercise catalog ready");
    }
    Ok(())
}
