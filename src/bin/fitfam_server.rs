// ABOUTME: FitFam server binary: loads configuration, initializes logging, and serves the API
// ABOUTME: Command-line flags override the port and database location from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # FitFam Server Binary
//!
//! ```bash
//! # Serve with environment configuration
//! cargo run --bin fitfam-server
//!
//! # Override port and database
//! cargo run --bin fitfam-server -- --http-port 9000 --database-url sqlite:./data/dev.db
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use fitfam_server::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    server::FitFamServer,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitfam-server")]
#[command(about = "FitFam - social workout planning API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url =
            DatabaseUrl::parse_url(&url).context("Invalid --database-url value")?;
    }

    info!("Starting FitFam server");
    info!("{}", config.summary());

    let server = FitFamServer::new(config).await?;
    if let Err(e) = server.run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
