// ABOUTME: Workout domain models: daily workouts, exercises, and logged sets
// ABOUTME: Workout type and difficulty enums with their database string forms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Training goal a workout is built for
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Heavier load, fewer reps
    Strength,
    /// Lighter load, higher reps (the "toning" goal)
    WeightLoss,
}

impl WorkoutType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::WeightLoss => "weight_loss",
        }
    }

    /// Map a generator goal (`strength` or `toning`) to a workout type
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an empty or unknown goal
    pub fn from_goal(goal: &str) -> Result<Self, AppError> {
        match goal.trim().to_lowercase().as_str() {
            "" => Err(AppError::invalid_input("Goal is required")),
            "strength" | "1" => Ok(Self::Strength),
            "toning" | "weight_loss" | "2" => Ok(Self::WeightLoss),
            other => Err(AppError::invalid_input(format!("Unknown goal: {other}"))),
        }
    }
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Self::Strength),
            "weight_loss" => Ok(Self::WeightLoss),
            _ => Err(AppError::invalid_input(format!("Invalid workout type: {s}"))),
        }
    }
}

/// Workout difficulty bucket
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Score 0..=1
    Easy,
    /// Score 2..=4
    Medium,
    /// Score 5..=6
    Hard,
}

impl Difficulty {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(AppError::invalid_input(format!("Invalid difficulty: {s}"))),
        }
    }
}

/// A dated workout owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWorkout {
    /// Workout id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Body parts plus creation date, e.g. `Chest/Back (3/7/25)`
    pub title: String,
    /// Goal the workout was generated for
    pub workout_type: WorkoutType,
    /// Scored difficulty
    pub difficulty: Difficulty,
    /// Estimated duration in minutes
    pub duration_minutes: u32,
    /// All of the owner's sets are complete
    pub completed: bool,
    /// Marked as favorite by the owner
    pub is_favorite: bool,
    /// Shared with at least one partner
    pub is_shared: bool,
    /// Partners this workout is shared with
    pub shared_with: Vec<Uuid>,
    /// Workout date
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

/// An exercise instance inside a daily workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Exercise id
    pub id: Uuid,
    /// Parent workout
    pub workout_id: Uuid,
    /// Exercise name
    pub name: String,
    /// Planned number of sets
    pub target_sets: u32,
    /// Planned reps, free text such as `6-12`
    pub target_reps: String,
    /// Muscle group
    pub body_part: String,
    /// Free-form notes (`Equipment: X, Grip: Y`)
    pub notes: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A single logged set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Set id
    pub id: Uuid,
    /// Parent exercise
    pub exercise_id: Uuid,
    /// User who logs this set
    pub user_id: Uuid,
    /// 1-based position within the exercise
    pub set_number: u32,
    /// Weight in lbs
    pub weight: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Weight and reps are both positive
    pub completed: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update
    pub updated_at: DateTime<Utc>,
}

/// Exercise description submitted to the workout generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseInput {
    /// Exercise name
    pub name: String,
    /// Planned number of sets
    pub target_sets: u32,
    /// Planned reps
    pub target_reps: String,
    /// Muscle group
    pub body_part: String,
    /// Notes, may mention equipment
    #[serde(default)]
    pub notes: Option<String>,
}

/// Set progress for one exercise in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Exercise id
    pub id: Uuid,
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub body_part: String,
    /// Planned sets
    pub target_sets: u32,
    /// Planned reps
    pub target_reps: String,
    /// Owner's logged sets
    pub total_sets: u32,
    /// Owner's completed sets
    pub completed_sets: u32,
}

/// Workout with exercise summaries, used by the week and favorites listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// The workout row
    #[serde(flatten)]
    pub workout: DailyWorkout,
    /// Exercises in insertion order
    pub exercises: Vec<ExerciseSummary>,
}

/// Exercise with the caller's sets, used by the detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDetail {
    /// The exercise row
    #[serde(flatten)]
    pub exercise: WorkoutExercise,
    /// Equipment parsed from notes, `None` when absent
    pub equipment: String,
    /// Caller's sets sorted by set number
    pub sets: Vec<ExerciseSet>,
}

/// Full workout detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDetail {
    /// The workout row
    #[serde(flatten)]
    pub workout: DailyWorkout,
    /// Exercises in insertion order
    pub exercises: Vec<ExerciseDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_mapping() {
        assert_eq!(
            WorkoutType::from_goal("Strength").unwrap(),
            WorkoutType::Strength
        );
        assert_eq!(
            WorkoutType::from_goal("toning").unwrap(),
            WorkoutType::WeightLoss
        );
        assert!(WorkoutType::from_goal("").is_err());
        assert!(WorkoutType::from_goal("cardio").is_err());
    }

    #[test]
    fn test_enum_round_trip_strings() {
        for t in [WorkoutType::Strength, WorkoutType::WeightLoss] {
            assert_eq!(t.as_str().parse::<WorkoutType>().unwrap(), t);
        }
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
        assert_eq!(
            serde_json::to_string(&WorkoutType::WeightLoss).unwrap(),
            "\"weight_loss\""
        );
    }
}
