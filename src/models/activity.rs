// ABOUTME: Activity feed models: entries, reactions, and comments
// ABOUTME: Reaction type enum and the aggregated feed item returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, WorkoutType};
use crate::errors::AppError;

/// Activity type recorded when a workout is completed
pub const WORKOUT_COMPLETED: &str = "workout_completed";

/// Reaction emoji kinds
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    /// Thumbs up
    Like,
    /// Fire
    Fire,
    /// Party popper
    Celebrate,
    /// Heart
    Heart,
}

impl ReactionType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Fire => "fire",
            Self::Celebrate => "celebrate",
            Self::Heart => "heart",
        }
    }
}

impl Display for ReactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "fire" => Ok(Self::Fire),
            "celebrate" => Ok(Self::Celebrate),
            "heart" => Ok(Self::Heart),
            _ => Err(AppError::invalid_input(format!("Invalid reaction type: {s}"))),
        }
    }
}

/// A row in the activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Entry id
    pub id: Uuid,
    /// Author
    pub user_id: Uuid,
    /// Related workout, cleared if the workout is deleted
    pub workout_id: Option<Uuid>,
    /// Kind of activity
    pub activity_type: String,
    /// Display text, e.g. `Completed Chest/Back (3/7/25)`
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Outcome of a reaction toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReactionToggle {
    /// A reaction was inserted
    Added,
    /// The caller's existing reaction was deleted
    Removed,
}

/// Reaction as shown on a feed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSummary {
    /// Reaction id
    pub id: Uuid,
    /// Reaction kind
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    /// Who reacted
    pub user_id: Uuid,
}

/// A comment on a feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id
    pub id: Uuid,
    /// Entry commented on
    pub activity_id: Uuid,
    /// Author
    pub user_id: Uuid,
    /// Author name at the time of writing
    pub user_name: String,
    /// Trimmed text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Author block on a feed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedAuthor {
    /// Author id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Handle
    pub username: String,
}

/// Workout block on a feed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedWorkout {
    /// Workout id
    pub id: Uuid,
    /// Workout title
    pub title: String,
    /// Goal
    pub workout_type: WorkoutType,
    /// Difficulty
    pub difficulty: Difficulty,
}

/// Feed entry with author, workout, reactions, and comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    /// Entry id
    pub id: Uuid,
    /// Kind of activity
    pub activity_type: String,
    /// Display text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Author
    pub user: FeedAuthor,
    /// Related workout if it still exists
    pub workout: Option<FeedWorkout>,
    /// Reactions in insertion order
    pub reactions: Vec<ReactionSummary>,
    /// Comments, oldest first
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_type_parse() {
        assert_eq!("FIRE".parse::<ReactionType>().unwrap(), ReactionType::Fire);
        assert!("thumbs".parse::<ReactionType>().is_err());
    }

    #[test]
    fn test_reaction_summary_uses_type_key() {
        let summary = ReactionSummary {
            id: Uuid::new_v4(),
            reaction_type: ReactionType::Heart,
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "heart");
    }
}
