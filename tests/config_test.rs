// ABOUTME: Integration tests for loading server configuration from process environment
// ABOUTME: Runs serially because each test mutates shared environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use fitfam_server::config::{Environment, ServerConfig};
use serial_test::serial;

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "JWT_SECRET",
    "HTTP_PORT",
    "DATABASE_URL",
    "BCRYPT_COST",
    "JWT_EXPIRY_HOURS",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_vars();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "a-long-enough-secret-for-testing-purposes");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert!(config.database.url.is_memory());
    assert_eq!(config.environment, Environment::Development);
    assert!(config.expose_reset_tokens());

    clear_vars();
}

#[test]
#[serial]
fn test_from_env_rejects_out_of_range_bcrypt_cost() {
    clear_vars();
    env::set_var("BCRYPT_COST", "2");

    assert!(ServerConfig::from_env().is_err());

    clear_vars();
}

#[test]
#[serial]
fn test_production_hides_reset_tokens_and_needs_secret() {
    clear_vars();
    env::set_var("ENVIRONMENT", "production");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("JWT_SECRET", "production-secret-with-at-least-32-bytes!");
    let config = ServerConfig::from_env().unwrap();
    assert!(!config.expose_reset_tokens());
    assert!(config.summary().contains("production"));
    assert!(!config.summary().contains("production-secret"));

    clear_vars();
}
