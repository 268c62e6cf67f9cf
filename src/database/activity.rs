// ABOUTME: Activity feed database operations
// ABOUTME: Feed entries, visibility through accepted partnerships, reactions, and comments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{format_timestamp, get_timestamp, get_uuid, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityEntry, Comment, FeedAuthor, FeedItem, FeedWorkout, ReactionSummary, ReactionToggle,
    ReactionType, WORKOUT_COMPLETED,
};

/// Users whose entries `$1` can see: self plus accepted partners
const VISIBLE_AUTHORS: &str = r"
    SELECT $1
    UNION
    SELECT CASE WHEN p.user_id = $1 THEN p.partner_id ELSE p.user_id END
    FROM workout_partners p
    WHERE (p.user_id = $1 OR p.partner_id = $1) AND p.status = 'accepted'
";

/// Activity feed database operations manager
pub struct ActivityManager {
    pool: SqlitePool,
}

impl ActivityManager {
    /// Create a new activity manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a workout completion unless one was already recorded for that workout.
    /// Returns the new entry when one was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn record_workout_completed(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        title: &str,
    ) -> AppResult<Option<ActivityEntry>> {
        let entry = ActivityEntry {
            id: Uuid::new_v4(),
            user_id,
            workout_id: Some(workout_id),
            activity_type: WORKOUT_COMPLETED.to_owned(),
            content: format!("Completed {title}"),
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r"
            INSERT INTO activity_feed (id, user_id, workout_id, activity_type, content, created_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (
                SELECT 1 FROM activity_feed WHERE workout_id = $3 AND activity_type = $4
            )
            ",
        )
        .bind(entry.id.to_string())
        .bind(user_id.to_string())
        .bind(workout_id.to_string())
        .bind(&entry.activity_type)
        .bind(&entry.content)
        .bind(format_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create feed entry: {e}")))?;

        Ok((result.rows_affected() > 0).then_some(entry))
    }

    /// Get an entry if `viewer_id` is allowed to see it
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_visible_entry(
        &self,
        viewer_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<Option<ActivityEntry>> {
        let row = sqlx::query(&format!(
            r"
            SELECT id, user_id, workout_id, activity_type, content, created_at
            FROM activity_feed
            WHERE id = $2 AND user_id IN ({VISIBLE_AUTHORS})
            "
        ))
        .bind(viewer_id.to_string())
        .bind(activity_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get feed entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    /// Feed for `viewer_id`, newest first, with reactions and comments attached
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn feed(&self, viewer_id: Uuid, limit: i64, offset: i64) -> AppResult<Vec<FeedItem>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT f.id, f.user_id, f.workout_id, f.activity_type, f.content, f.created_at,
                u.name AS author_name, u.username AS author_username,
                w.title AS workout_title, w.workout_type, w.difficulty
            FROM activity_feed f
            JOIN users u ON u.id = f.user_id
            LEFT JOIN daily_workouts w ON w.id = f.workout_id
            WHERE f.user_id IN ({VISIBLE_AUTHORS})
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(viewer_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load feed: {e}")))?;

        let mut items = rows
            .iter()
            .map(row_to_feed_item)
            .collect::<AppResult<Vec<_>>>()?;
        if items.is_empty() {
            return Ok(items);
        }

        let ids: Vec<String> = items.iter().map(|i| i.id.to_string()).collect();
        let mut reactions = self.reactions_for(&ids).await?;
        let mut comments = self.comments_for(&ids).await?;
        for item in &mut items {
            item.reactions = reactions.remove(&item.id).unwrap_or_default();
            item.comments = comments.remove(&item.id).unwrap_or_default();
        }
        Ok(items)
    }

    async fn reactions_for(&self, ids: &[String]) -> AppResult<HashMap<Uuid, Vec<ReactionSummary>>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, activity_id, user_id, reaction_type FROM activity_reactions WHERE activity_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        builder.push(") ORDER BY created_at");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load reactions: {e}")))?;

        let mut grouped: HashMap<Uuid, Vec<ReactionSummary>> = HashMap::new();
        for row in &rows {
            let reaction_type: String = row.try_get("reaction_type")?;
            grouped
                .entry(get_uuid(row, "activity_id")?)
                .or_default()
                .push(ReactionSummary {
                    id: get_uuid(row, "id")?,
                    reaction_type: reaction_type
                        .parse()
                        .map_err(|e: AppError| AppError::database(e.message))?,
                    user_id: get_uuid(row, "user_id")?,
                });
        }
        Ok(grouped)
    }

    async fn comments_for(&self, ids: &[String]) -> AppResult<HashMap<Uuid, Vec<Comment>>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, activity_id, user_id, user_name, content, created_at FROM activity_comments WHERE activity_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        builder.push(") ORDER BY created_at ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load comments: {e}")))?;

        let mut grouped: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in &rows {
            let comment = row_to_comment(row)?;
            grouped.entry(comment.activity_id).or_default().push(comment);
        }
        Ok(grouped)
    }

    /// Remove the user's reaction on an entry if present, otherwise add one
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn toggle_reaction(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        reaction_type: ReactionType,
    ) -> AppResult<ReactionToggle> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM activity_reactions WHERE activity_id = $1 AND user_id = $2",
        )
        .bind(activity_id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove reaction: {e}")))?;

        let outcome = if removed.rows_affected() > 0 {
            ReactionToggle::Removed
        } else {
            sqlx::query(
                r"
                INSERT INTO activity_reactions (id, activity_id, user_id, reaction_type, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(activity_id.to_string())
            .bind(user_id.to_string())
            .bind(reaction_type.as_str())
            .bind(format_timestamp(Utc::now()))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to add reaction: {e}")))?;
            ReactionToggle::Added
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Insert a comment
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn add_comment(&self, comment: &Comment) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO activity_comments (id, activity_id, user_id, user_name, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.to_string())
        .bind(comment.activity_id.to_string())
        .bind(comment.user_id.to_string())
        .bind(&comment.user_name)
        .bind(&comment.content)
        .bind(format_timestamp(comment.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add comment: {e}")))?;
        Ok(())
    }
}

fn optional_uuid(row: &SqliteRow, column: &str) -> AppResult<Option<Uuid>> {
    row.try_get::<Option<String>, _>(column)?
        .as_deref()
        .map(parse_uuid)
        .transpose()
}

fn row_to_entry(row: &SqliteRow) -> AppResult<ActivityEntry> {
    Ok(ActivityEntry {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        workout_id: optional_uuid(row, "workout_id")?,
        activity_type: row.try_get("activity_type")?,
        content: row.try_get("content")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}

fn row_to_feed_item(row: &SqliteRow) -> AppResult<FeedItem> {
    let entry = row_to_entry(row)?;

    let workout_title: Option<String> = row.try_get("workout_title")?;
    let workout_type: Option<String> = row.try_get("workout_type")?;
    let difficulty: Option<String> = row.try_get("difficulty")?;
    let workout = match (entry.workout_id, workout_title, workout_type, difficulty) {
        (Some(id), Some(title), Some(workout_type), Some(difficulty)) => Some(FeedWorkout {
            id,
            title,
            workout_type: workout_type
                .parse()
                .map_err(|e: AppError| AppError::database(e.message))?,
            difficulty: difficulty
                .parse()
                .map_err(|e: AppError| AppError::database(e.message))?,
        }),
        _ => None,
    };

    Ok(FeedItem {
        id: entry.id,
        activity_type: entry.activity_type,
        content: entry.content,
        created_at: entry.created_at,
        user: FeedAuthor {
            id: entry.user_id,
            name: row.try_get("author_name")?,
            username: row.try_get("author_username")?,
        },
        workout,
        reactions: Vec::new(),
        comments: Vec::new(),
    })
}

fn row_to_comment(row: &SqliteRow) -> AppResult<Comment> {
    Ok(Comment {
        id: get_uuid(row, "id")?,
        activity_id: get_uuid(row, "activity_id")?,
        user_id: get_uuid(row, "user_id")?,
        user_name: row.try_get("user_name")?,
        content: row.try_get("content")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
