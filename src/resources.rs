// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the database, auth manager, auth middleware, draft store, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Server Resources
//!
//! Built once at startup and handed to every router as
//! `State<Arc<ServerResources>>`. Everything in here is cheap to clone.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::auth::{AuthManager, AuthResult};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::middleware::AuthMiddleware;
use crate::security::SecurityConfig;
use crate::services::DraftStore;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Shared SQLite handle
    pub database: Arc<Database>,
    /// Password hashing and token issuance
    pub auth_manager: AuthManager,
    /// Request authentication
    pub auth_middleware: AuthMiddleware,
    /// In-memory weekly drafts
    pub drafts: DraftStore,
    /// Loaded server configuration
    pub config: Arc<ServerConfig>,
    /// Response header profile and cookie flags
    pub security: SecurityConfig,
}

impl ServerResources {
    /// Wire up resources around an opened database
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = AuthManager::new(&config.auth);
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), Arc::clone(&database));

        Self {
            database,
            auth_middleware,
            auth_manager,
            drafts: DraftStore::new(),
            security: SecurityConfig::for_environment(config.environment),
            config,
        }
    }

    /// Authenticate the caller from the `Authorization` header or session cookie
    ///
    /// # Errors
    ///
    /// Returns an auth error when no valid credentials are presented
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        self.auth_middleware.authenticate_request(headers).await
    }
}
