// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a strongly typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, limits, ports};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests, demos)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            bail!("Only SQLite databases are supported, got: {s}");
        }
        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        if path_str == ":memory:" || path_str.is_empty() {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Whether this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/fitfam.db"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Where the database lives
    pub url: DatabaseUrl,
    /// Seed the built-in exercise catalog when the catalog table is empty
    pub seed_catalog: bool,
}

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for session tokens
    pub jwt_secret: Vec<u8>,
    /// Session token lifetime
    pub jwt_expiry_hours: i64,
    /// Password reset token lifetime
    pub password_reset_expiry_minutes: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field(
                "password_reset_expiry_minutes",
                &self.password_reset_expiry_minutes,
            )
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_jwt_secret().to_vec(),
            jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
            password_reset_expiry_minutes: defaults::PASSWORD_RESET_EXPIRY_MINUTES,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `*` or a comma-separated list of origins
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".into(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.into(),
            http_port: ports::DEFAULT_HTTP_PORT,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                seed_catalog: true,
            },
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid, or if
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any present value fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_str_or_default(
            &lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        );

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                if environment.is_production() {
                    bail!("JWT_SECRET must be set in production");
                }
                warn!("JWT_SECRET not set; generated an ephemeral secret (sessions will not survive restarts)");
                generate_jwt_secret().to_vec()
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| defaults::HOST.into()),
            http_port: parse_or("HTTP_PORT", &lookup, ports::DEFAULT_HTTP_PORT)?,
            log_level: LogLevel::from_str_or_default(
                &lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            ),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(
                    &lookup("DATABASE_URL").unwrap_or_else(|| defaults::DATABASE_URL.into()),
                )
                .context("Invalid DATABASE_URL value")?,
                seed_catalog: parse_or("SEED_CATALOG", &lookup, true)?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_or(
                    "JWT_EXPIRY_HOURS",
                    &lookup,
                    defaults::JWT_EXPIRY_HOURS,
                )?,
                password_reset_expiry_minutes: parse_or(
                    "PASSWORD_RESET_EXPIRY_MINUTES",
                    &lookup,
                    defaults::PASSWORD_RESET_EXPIRY_MINUTES,
                )?,
                bcrypt_cost: parse_or("BCRYPT_COST", &lookup, bcrypt::DEFAULT_COST)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".into()),
            },
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                &lookup,
                defaults::REQUEST_TIMEOUT_SECS,
            )?,
        })
    }

    /// Sanity-check ranges that parse fine but make no sense
    ///
    /// # Errors
    ///
    /// Returns an error when a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.auth.password_reset_expiry_minutes <= 0 {
            bail!("PASSWORD_RESET_EXPIRY_MINUTES must be positive");
        }
        if !(limits::MIN_BCRYPT_COST..=limits::MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {} and {}",
                limits::MIN_BCRYPT_COST,
                limits::MAX_BCRYPT_COST
            );
        }
        if self.environment.is_production() && self.auth.jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes in production");
        }
        Ok(())
    }

    /// Configuration for tests: in-memory database, fixed secret
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
                seed_catalog: true,
            },
            auth: AuthConfig {
                jwt_secret: b"fitfam-test-secret-fitfam-test-secret".to_vec(),
                bcrypt_cost: limits::MIN_BCRYPT_COST,
                ..AuthConfig::default()
            },
            ..Self::default()
        }
    }

    /// Log-safe configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitFam Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Seed Catalog: {}\n\
             - Session Lifetime: {}h\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            if self.database.url.is_memory() {
                "SQLite (in-memory)".to_owned()
            } else {
                self.database.url.to_connection_string()
            },
            self.database.seed_catalog,
            self.auth.jwt_expiry_hours,
            self.cors.allowed_origins,
        )
    }

    /// Whether password reset tokens may be echoed back to the caller
    #[must_use]
    pub const fn expose_reset_tokens(&self) -> bool {
        !self.environment.is_production()
    }
}

/// Generate a random 64-byte HMAC secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        None => Ok(default),
    }
}
