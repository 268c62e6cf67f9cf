// ABOUTME: Main library entry point for the FitFam social workout API
// ABOUTME: Workouts, partner accountability, activity feeds, and weekly progress over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![deny(unsafe_code)]

//! # FitFam Server
//!
//! A JSON API for planning and logging workouts with accountability partners.
//!
//! ## Features
//!
//! - **Accounts**: bcrypt password hashes, HS256 session tokens backed by
//!   session rows, bearer or cookie authentication, password reset
//! - **Workouts**: catalog-driven generation, rule-based difficulty scoring,
//!   per-user set logging, automatic completion tracking
//! - **Partners**: status-gated invites, favorites, side-by-side weekly progress
//! - **Activity feed**: completion announcements with reactions and comments
//! - **Weekly drafts**: an in-memory sample week per user
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers that authenticate and delegate
//! - **Services**: business rules and access checks
//! - **Database**: `SQLite` via `sqlx`, one manager per domain
//! - **Intelligence**: pure scoring and aggregation math
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitfam_server::config::ServerConfig;
//! use fitfam_server::server::FitFamServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     FitFamServer::new(config).await?.run().await
//! }
//! ```

/// Session tokens, password hashing, reset tokens
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Scoring and weekly statistics math
pub mod intelligence;

/// Structured logging
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Security headers and cookies
pub mod security;

/// Server bootstrap
pub mod server;

/// Business logic
pub mod services;
