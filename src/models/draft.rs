// ABOUTME: In-memory weekly plan draft models
// ABOUTME: Sample week of daily workouts with progress tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Difficulty;

/// Lifecycle of a weekly plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// At least one day still open
    #[default]
    Active,
    /// Every day is done
    Completed,
}

/// An exercise in a draft day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftExercise {
    /// Exercise id
    pub id: Uuid,
    /// Exercise name
    pub name: String,
    /// Planned sets
    pub target_sets: u32,
    /// Planned reps range
    pub target_reps: String,
    /// Muscle group
    pub body_part: String,
}

/// One day of a weekly plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftWorkout {
    /// Day id
    pub id: Uuid,
    /// Scheduled date
    pub date: NaiveDate,
    /// `Day N Workout`
    pub title: String,
    /// Minutes
    pub duration_minutes: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Exercises
    pub exercises: Vec<DraftExercise>,
    /// Marked done
    pub completed: bool,
}

/// Completion counters for a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanProgress {
    /// Completed days
    pub completed_workouts: u32,
    /// Days in the plan
    pub total_workouts: u32,
    /// Last change
    pub last_updated: DateTime<Utc>,
}

/// A week of sample workouts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPlan {
    /// Plan id
    pub id: Uuid,
    /// Monday
    pub week_start_date: NaiveDate,
    /// Sunday
    pub week_end_date: NaiveDate,
    /// Days
    pub workouts: Vec<DraftWorkout>,
    /// Partner the plan is shared with
    pub partner_id: Option<Uuid>,
    /// Lifecycle status
    pub status: PlanStatus,
    /// Completion counters
    pub progress: PlanProgress,
}
