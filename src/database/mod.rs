// ABOUTME: SQLite connection management, schema migrations, and row conversion helpers
// ABOUTME: Database handle plus per-domain managers that wrap the shared pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Database Management
//!
//! The server owns a single `SQLite` database. [`Database`] holds the pool, runs
//! the idempotent schema migrations at startup, and implements account and
//! session storage directly. Each remaining domain gets a small manager struct
//! (`WorkoutManager`, `PartnerManager`, `ActivityManager`, `CatalogManager`)
//! that wraps a clone of the pool.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC with
//! microsecond precision, so lexicographic comparison in SQL matches
//! chronological order.

/// Activity feed, reactions, comments
pub mod activity;
/// Exercise catalog and seed data
pub mod catalog;
/// Partnerships
pub mod partners;
/// Users, sessions, password resets
mod users;
/// Workouts, exercises, sets
pub mod workouts;

pub use activity::ActivityManager;
pub use catalog::CatalogManager;
pub use partners::PartnerManager;
pub use workouts::WorkoutManager;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database handle shared by all request handlers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a migration fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .with_context(|| format!("Invalid database URL: {}", url.to_connection_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if url.is_memory() {
            // Every in-memory connection is a separate database, so keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            if let DatabaseUrl::SQLite { path } = url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            SqlitePoolOptions::new()
                .max_connections(8)
                .acquire_timeout(Duration::from_secs(10))
                .connect_with(options)
                .await
        }
        .context("Failed to connect to SQLite database")?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Workout, exercise, and set operations
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Partnership operations
    #[must_use]
    pub fn partners(&self) -> PartnerManager {
        PartnerManager::new(self.pool.clone())
    }

    /// Activity feed operations
    #[must_use]
    pub fn activity(&self) -> ActivityManager {
        ActivityManager::new(self.pool.clone())
    }

    /// Exercise catalog operations
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// Trivial query used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_partners().await?;
        self.migrate_workouts().await?;
        self.migrate_activity().await?;
        self.migrate_catalog().await?;
        debug!("Schema migrations applied");
        Ok(())
    }

    async fn migrate_partners(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_partners (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                partner_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'accepted', 'rejected')),
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                CHECK (user_id <> partner_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_partners_user ON workout_partners(user_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_partners_partner ON workout_partners(partner_id)",
        )
        .execute(&self.pool)
        .await?;
        // At most one live row per unordered pair, whoever sent the invite
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_partners_active_pair
            ON workout_partners(min(user_id, partner_id), max(user_id, partner_id))
            WHERE status IN ('pending', 'accepted')
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                workout_type TEXT NOT NULL CHECK (workout_type IN ('strength', 'weight_loss')),
                difficulty TEXT NOT NULL CHECK (difficulty IN ('easy', 'medium', 'hard')),
                duration INTEGER NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                is_shared INTEGER NOT NULL DEFAULT 0,
                shared_with TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES daily_workouts(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                target_sets INTEGER NOT NULL,
                target_reps TEXT NOT NULL,
                body_part TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_sets (
                id TEXT PRIMARY KEY,
                exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                set_number INTEGER NOT NULL,
                weight REAL NOT NULL DEFAULT 0,
                reps INTEGER NOT NULL DEFAULT 0,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_created ON daily_workouts(user_id, created_at)",
            "CREATE INDEX IF NOT EXISTS idx_exercises_workout ON workout_exercises(workout_id)",
            "CREATE INDEX IF NOT EXISTS idx_sets_exercise_user ON exercise_sets(exercise_id, user_id)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }

    async fn migrate_activity(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activity_feed (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_id TEXT REFERENCES daily_workouts(id) ON DELETE SET NULL,
                activity_type TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activity_reactions (
                id TEXT PRIMARY KEY,
                activity_id TEXT NOT NULL REFERENCES activity_feed(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                reaction_type TEXT NOT NULL CHECK (reaction_type IN ('like', 'fire', 'celebrate', 'heart')),
                created_at TEXT NOT NULL,
                UNIQUE (activity_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activity_comments (
                id TEXT PRIMARY KEY,
                activity_id TEXT NOT NULL REFERENCES activity_feed(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                user_name TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_feed_user_created ON activity_feed(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_catalog(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS available_exercises (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                main_muscle_group TEXT,
                primary_equipment TEXT,
                grip_style TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_catalog_muscle ON available_exercises(main_muscle_group)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Canonical timestamp text used in every table
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID: {e}")))
}

pub(crate) fn get_uuid(row: &SqliteRow, column: &str) -> AppResult<Uuid> {
    parse_uuid(&row.try_get::<String, _>(column)?)
}

pub(crate) fn get_timestamp(row: &SqliteRow, column: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp(&row.try_get::<String, _>(column)?)
}

pub(crate) fn get_u32(row: &SqliteRow, column: &str) -> AppResult<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).map_err(|e| AppError::database(format!("Invalid {column}: {e}")))
}
