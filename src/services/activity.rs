// ABOUTME: Activity feed service: paging, reactions, and comments
// ABOUTME: Only entries by the caller or accepted partners can be seen or interacted with
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::Utc;
use uuid::Uuid;

use crate::constants::limits::{DEFAULT_FEED_LIMIT, MAX_COMMENT_LENGTH, MAX_FEED_LIMIT};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityEntry, Comment, FeedItem, ReactionToggle, ReactionType};

/// Clamp client paging input: limit to `1..=100` (default 20), offset to `>= 0`
#[must_use]
pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT),
        offset.unwrap_or(0).max(0),
    )
}

/// One page of the caller's feed, newest first
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn feed(
    database: &Database,
    user_id: Uuid,
    limit: Option<i64>,
    offset: Option<i64>,
) -> AppResult<Vec<FeedItem>> {
    let (limit, offset) = page_bounds(limit, offset);
    database.activity().feed(user_id, limit, offset).await
}

async fn visible_entry(
    database: &Database,
    user_id: Uuid,
    activity_id: Uuid,
) -> AppResult<ActivityEntry> {
    database
        .activity()
        .get_visible_entry(user_id, activity_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Activity").with_resource_id(activity_id.to_string())
        })
}

/// Add the caller's reaction, or remove it if they already reacted
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when the entry is not in the caller's feed
pub async fn toggle_reaction(
    database: &Database,
    user_id: Uuid,
    activity_id: Uuid,
    reaction_type: ReactionType,
) -> AppResult<ReactionToggle> {
    visible_entry(database, user_id, activity_id).await?;
    database
        .activity()
        .toggle_reaction(activity_id, user_id, reaction_type)
        .await
}

/// Trimmed comment text, checked for emptiness and length
///
/// # Errors
///
/// Returns `INVALID_INPUT` when empty after trimming or too long
pub fn normalize_comment(content: &str) -> AppResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::invalid_input("Comment cannot be empty"));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Comment cannot exceed {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(content.to_owned())
}

/// Comment on a feed entry
///
/// # Errors
///
/// Returns `INVALID_INPUT` for bad content and `RESOURCE_NOT_FOUND` when the
/// entry is not in the caller's feed
pub async fn add_comment(
    database: &Database,
    user_id: Uuid,
    activity_id: Uuid,
    content: &str,
) -> AppResult<Comment> {
    let content = normalize_comment(content)?;
    visible_entry(database, user_id, activity_id).await?;
    let author = database.get_user_required(user_id).await?;

    let comment = Comment {
        id: Uuid::new_v4(),
        activity_id,
        user_id,
        user_name: author.name,
        content,
        created_at: Utc::now(),
    };
    database.activity().add_comment(&comment).await?;
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(None, None), (20, 0));
        assert_eq!(page_bounds(Some(0), Some(-5)), (1, 0));
        assert_eq!(page_bounds(Some(500), Some(40)), (100, 40));
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(normalize_comment("  nice lift  ").unwrap(), "nice lift");
        assert!(normalize_comment("   ").is_err());
        assert!(normalize_comment(&"a".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
        assert!(normalize_comment(&"a".repeat(MAX_COMMENT_LENGTH)).is_ok());
    }
}
