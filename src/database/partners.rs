// ABOUTME: Partnership database operations for workout partners (FitFam)
// ABOUTME: Invites, responses, favorites, accepted partner lookups, and partner search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::users::{like_pattern, row_to_summary};
use super::{format_timestamp, get_timestamp, get_uuid};
use crate::constants::limits::USER_SEARCH_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::models::{AcceptedPartner, PartnerStatus, Partnership, PartnershipView, UserSummary};

const PARTNERSHIP_COLUMNS: &str =
    "p.id, p.user_id, p.partner_id, p.status, p.is_favorite, p.created_at, p.updated_at";

/// Partnership database operations manager
pub struct PartnerManager {
    pool: SqlitePool,
}

impl PartnerManager {
    /// Create a new partner manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a partnership row
    ///
    /// # Errors
    ///
    /// Returns a conflict when a pending or accepted row already links the
    /// pair, or an error if the database query fails
    pub async fn create(&self, partnership: &Partnership) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO workout_partners (id, user_id, partner_id, status, is_favorite, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(partnership.id.to_string())
        .bind(partnership.user_id.to_string())
        .bind(partnership.partner_id.to_string())
        .bind(partnership.status.as_str())
        .bind(partnership.is_favorite)
        .bind(format_timestamp(partnership.created_at))
        .bind(format_timestamp(partnership.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("A partnership with this user already exists")
            }
            _ => AppError::database(format!("Failed to create partnership: {e}")),
        })?;

        Ok(partnership.id)
    }

    /// Get a partnership by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Partnership>> {
        let row = sqlx::query(&format!(
            "SELECT {PARTNERSHIP_COLUMNS} FROM workout_partners p WHERE p.id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get partnership: {e}")))?;

        row.map(|r| row_to_partnership(&r)).transpose()
    }

    /// All partnership rows between two users, in either direction, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn between(&self, a: Uuid, b: Uuid) -> AppResult<Vec<Partnership>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PARTNERSHIP_COLUMNS} FROM workout_partners p
            WHERE (p.user_id = $1 AND p.partner_id = $2) OR (p.user_id = $2 AND p.partner_id = $1)
            ORDER BY p.created_at DESC
            "
        ))
        .bind(a.to_string())
        .bind(b.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get partnership: {e}")))?;

        rows.iter().map(row_to_partnership).collect()
    }

    /// The accepted partnership between two users, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn accepted_between(&self, a: Uuid, b: Uuid) -> AppResult<Option<Partnership>> {
        Ok(self
            .between(a, b)
            .await?
            .into_iter()
            .find(|p| p.status == PartnerStatus::Accepted))
    }

    /// Delete rejected rows between two users so a fresh invite can replace them
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_rejected_between(&self, a: Uuid, b: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM workout_partners
            WHERE status = 'rejected'
              AND ((user_id = $1 AND partner_id = $2) OR (user_id = $2 AND partner_id = $1))
            ",
        )
        .bind(a.to_string())
        .bind(b.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to clear rejected invites: {e}")))?;
        Ok(result.rows_affected())
    }

    /// Set the status of a partnership
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_status(&self, id: Uuid, status: PartnerStatus) -> AppResult<()> {
        sqlx::query("UPDATE workout_partners SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id.to_string())
            .bind(status.as_str())
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update partnership: {e}")))?;
        Ok(())
    }

    /// Delete a partnership row
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workout_partners WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete partnership: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the favorite flag on the accepted row where `user_id` invited `partner_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE workout_partners SET is_favorite = $3, updated_at = $4
            WHERE user_id = $1 AND partner_id = $2 AND status = 'accepted'
            ",
        )
        .bind(user_id.to_string())
        .bind(partner_id.to_string())
        .bind(is_favorite)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update favorite: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Rows the user sent, with the receiver's profile, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_sent(&self, user_id: Uuid) -> AppResult<Vec<PartnershipView>> {
        self.list_with_profiles(user_id, "p.user_id", "p.partner_id")
            .await
    }

    /// Rows the user received, with the initiator's profile, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_received(&self, user_id: Uuid) -> AppResult<Vec<PartnershipView>> {
        self.list_with_profiles(user_id, "p.partner_id", "p.user_id")
            .await
    }

    async fn list_with_profiles(
        &self,
        user_id: Uuid,
        own_column: &str,
        other_column: &str,
    ) -> AppResult<Vec<PartnershipView>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PARTNERSHIP_COLUMNS}, u.id AS other_id, u.name AS other_name, u.username AS other_username
            FROM workout_partners p
            JOIN users u ON u.id = {other_column}
            WHERE {own_column} = $1
            ORDER BY p.created_at DESC
            "
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list partnerships: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(PartnershipView {
                    partnership: row_to_partnership(row)?,
                    partner: UserSummary {
                        id: get_uuid(row, "other_id")?,
                        name: row.try_get("other_name")?,
                        username: row.try_get("other_username")?,
                    },
                })
            })
            .collect()
    }

    /// Accepted partners in either direction. Favorites the user marked come
    /// first, then by acceptance order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn accepted_partners(&self, user_id: Uuid) -> AppResult<Vec<AcceptedPartner>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.name
            FROM workout_partners p
            JOIN users u ON u.id = CASE WHEN p.user_id = $1 THEN p.partner_id ELSE p.user_id END
            WHERE (p.user_id = $1 OR p.partner_id = $1) AND p.status = 'accepted'
            ORDER BY CASE WHEN p.user_id = $1 AND p.is_favorite = 1 THEN 0 ELSE 1 END,
                p.updated_at
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list accepted partners: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(AcceptedPartner {
                    id: get_uuid(row, "id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    /// Number of accepted partnerships on either side
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_accepted(&self, user_id: Uuid) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM workout_partners
            WHERE (user_id = $1 OR partner_id = $1) AND status = 'accepted'
            ",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count partners: {e}")))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Number of pending invites the user received
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_pending_received(&self, user_id: Uuid) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workout_partners WHERE partner_id = $1 AND status = 'pending'",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count invites: {e}")))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Search users by username or email who are not already pending or
    /// accepted partners of the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn search_candidates(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.name, u.username FROM users u
            WHERE (LOWER(u.username) LIKE $2 ESCAPE '\' OR LOWER(u.email) LIKE $2 ESCAPE '\')
              AND u.id <> $1
              AND NOT EXISTS (
                SELECT 1 FROM workout_partners p
                WHERE p.status IN ('pending', 'accepted')
                  AND ((p.user_id = $1 AND p.partner_id = u.id)
                    OR (p.user_id = u.id AND p.partner_id = $1))
              )
            ORDER BY u.username
            LIMIT $3
            ",
        )
        .bind(user_id.to_string())
        .bind(like_pattern(query))
        .bind(USER_SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search partners: {e}")))?;

        rows.iter().map(row_to_summary).collect()
    }
}

fn row_to_partnership(row: &SqliteRow) -> AppResult<Partnership> {
    let status: String = row.try_get("status")?;
    Ok(Partnership {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        partner_id: get_uuid(row, "partner_id")?,
        status: status
            .parse()
            .map_err(|e: AppError| AppError::database(e.message))?,
        is_favorite: row.try_get("is_favorite")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
