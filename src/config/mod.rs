// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig used by binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Configuration module for the `FitFam` server
//!
//! All configuration comes from environment variables; there is no config file.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
};
