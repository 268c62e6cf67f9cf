// ABOUTME: HTTP server bootstrap: database, resources, router, and graceful shutdown
// ABOUTME: Binds the configured address and serves until SIGINT or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Server
//!
//! [`FitFamServer`] owns the startup sequence shared by the binary and the
//! integration tests: open and migrate the database, seed the catalog when
//! asked, build [`ServerResources`], and assemble the router.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::resources::ServerResources;
use crate::routes::build_router;

/// A configured server ready to bind
pub struct FitFamServer {
    resources: Arc<ServerResources>,
}

impl FitFamServer {
    /// Open the database, run migrations, and seed the catalog if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or seeded
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let database = Database::new(&config.database.url)
            .await
            .context("Failed to initialize database")?;

        if config.database.seed_catalog {
            let seeded = database
                .catalog()
                .seed_if_empty()
                .await
                .context("Failed to seed exercise catalog")?;
            if seeded > 0 {
                info!(count = seeded, "Exercise catalog seeded");
            }
        }

        Ok(Self {
            resources: Arc::new(ServerResources::new(database, Arc::new(config))),
        })
    }

    /// Shared resources, for callers that build their own router
    #[must_use]
    pub fn resources(&self) -> Arc<ServerResources> {
        Arc::clone(&self.resources)
    }

    /// The full application router
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(self.resources())
    }

    /// Bind and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", config.host, config.http_port))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("FitFam server listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("FitFam server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
