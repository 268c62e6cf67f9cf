// ABOUTME: User management database operations
// ABOUTME: Handles registration, profile updates, user search, sessions, and password resets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, get_timestamp, get_uuid, Database};
use crate::constants::limits::USER_SEARCH_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::models::{ProfileUpdate, Session, User, UserSummary};

const USER_COLUMNS: &str =
    "id, email, username, name, height, weight, password_hash, created_at, updated_at";

impl Database {
    /// Create users, sessions, and password reset tables
    pub(super) async fn migrate_users(&self) -> anyhow::Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                height REAL NOT NULL DEFAULT 0,
                weight REAL NOT NULL DEFAULT 0,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS password_resets (
                token_hash TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at TEXT NOT NULL,
                used_at TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user. Emails are stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email or username is taken
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, username, name, height, weight, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(user.id.to_string())
        .bind(user.email.trim().to_lowercase())
        .bind(user.username.trim())
        .bind(user.name.trim())
        .bind(user.height)
        .bind(user.weight)
        .bind(&user.password_hash)
        .bind(format_timestamp(user.created_at))
        .bind(format_timestamp(user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_user_conflict(e, "Failed to create user"))?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Get a user by id, failing when absent
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if no such user exists
    pub async fn get_user_required(&self, user_id: Uuid) -> AppResult<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_resource_id(user_id.to_string()))
    }

    /// Get a user by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Apply a partial profile update and bump `updated_at`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user and
    /// `RESOURCE_ALREADY_EXISTS` for a username conflict
    pub async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<User> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                name = COALESCE($2, name),
                username = COALESCE($3, username),
                height = COALESCE($4, height),
                weight = COALESCE($5, weight),
                updated_at = $6
            WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.username.as_deref().map(str::trim))
        .bind(update.height)
        .bind(update.weight)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_user_conflict(e, "Failed to update profile"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        self.get_user_required(user_id).await
    }

    /// Replace a user's password hash
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
            .bind(user_id.to_string())
            .bind(password_hash)
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update password: {e}")))?;
        Ok(())
    }

    /// Case-insensitive substring search on name or username, excluding the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn search_users_by_name(
        &self,
        query: &str,
        exclude_user_id: Uuid,
    ) -> AppResult<Vec<UserSummary>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query(
            r"
            SELECT id, name, username FROM users
            WHERE (LOWER(name) LIKE $1 ESCAPE '\' OR LOWER(username) LIKE $1 ESCAPE '\')
              AND id <> $2
            ORDER BY username
            LIMIT $3
            ",
        )
        .bind(pattern)
        .bind(exclude_user_id.to_string())
        .bind(USER_SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search users: {e}")))?;

        rows.iter().map(row_to_summary).collect()
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Persist a new session
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_session(&self, session: &Session) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(format_timestamp(session.expires_at))
        .bind(format_timestamp(session.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {e}")))?;
        Ok(())
    }

    /// Get a session that has not expired
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_active_session(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, expires_at, created_at FROM sessions WHERE id = $1 AND expires_at > $2",
        )
        .bind(session_id.to_string())
        .bind(format_timestamp(Utc::now()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get session: {e}")))?;

        row.map(|r| {
            Ok(Session {
                id: get_uuid(&r, "id")?,
                user_id: get_uuid(&r, "user_id")?,
                expires_at: get_timestamp(&r, "expires_at")?,
                created_at: get_timestamp(&r, "created_at")?,
            })
        })
        .transpose()
    }

    /// Delete one session
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_session(&self, session_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete session: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session of a user, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_user_sessions(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete sessions: {e}")))?;
        Ok(result.rows_affected())
    }

    // ========================================================================
    // Password resets
    // ========================================================================

    /// Store a hashed reset token
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_password_reset(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO password_resets (token_hash, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(token_hash)
        .bind(user_id.to_string())
        .bind(format_timestamp(expires_at))
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store reset token: {e}")))?;
        Ok(())
    }

    /// Mark a valid, unexpired, unused reset token as used and return its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn consume_password_reset(&self, token_hash: &str) -> AppResult<Option<Uuid>> {
        let now = format_timestamp(Utc::now());
        let row = sqlx::query(
            r"
            UPDATE password_resets SET used_at = $2
            WHERE token_hash = $1 AND used_at IS NULL AND expires_at > $2
            RETURNING user_id
            ",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to consume reset token: {e}")))?;

        row.map(|r| get_uuid(&r, "user_id")).transpose()
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        Ok(User {
            id: get_uuid(row, "id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            height: row.try_get("height")?,
            weight: row.try_get("weight")?,
            password_hash: row.try_get("password_hash")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        })
    }

    fn map_user_conflict(error: sqlx::Error, context: &str) -> AppError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                let field = if db.message().contains("users.email") {
                    "email"
                } else {
                    "username"
                };
                AppError::already_exists(format!("A user with this {field} already exists"))
            }
            _ => AppError::database(format!("{context}: {error}")),
        }
    }
}

/// `%query%` with LIKE wildcards escaped, lowercased
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub(crate) fn row_to_summary(row: &SqliteRow) -> AppResult<UserSummary> {
    Ok(UserSummary {
        id: get_uuid(row, "id")?,
        name: row.try_get("name")?,
        username: row.try_get("username")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Jo "), "%jo%");
        assert_eq!(like_pattern("50%_"), "%50\\%\\_%");
    }
}
