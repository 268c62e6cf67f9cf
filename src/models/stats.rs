// ABOUTME: Aggregated statistics views for the dashboard, workouts page, and partner comparison
// ABOUTME: Plain serializable structs; the math lives in the intelligence module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Set completion totals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseCompletion {
    /// Set rows
    pub total: u32,
    /// Completed set rows
    pub completed: u32,
    /// Rounded percentage
    pub rate: u32,
}

/// Dashboard numbers for the current week
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Set completion this week
    pub exercise_completion: ExerciseCompletion,
    /// Accepted partnerships
    pub fit_fam_count: u32,
    /// Completed workouts this week
    pub weekly_streak: u32,
    /// Sum of weight over completed sets
    pub total_weight: f64,
}

/// Partner block on the workouts page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerSummary {
    /// Partner id
    pub id: Uuid,
    /// Partner name
    pub name: String,
    /// Partner's completed workouts this week
    pub completed_workouts: u32,
    /// Partner's completion percentage this week
    pub completion_rate: u32,
}

/// Workouts page statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkoutStats {
    /// Workouts this week
    pub weekly_workouts: u32,
    /// Completed workouts this week
    pub completed_workouts: u32,
    /// Rounded percentage
    pub completion_rate: u32,
    /// Set completion this week
    pub exercise_completion: ExerciseCompletion,
    /// Favorite or first accepted partner
    pub partner: Option<PartnerSummary>,
}

/// Side-by-side progress with a partner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerStats {
    /// Partner id
    pub partner_id: Uuid,
    /// Partner name
    pub name: String,
    /// Partner handle
    pub username: String,
    /// Caller marked the partner as favorite
    pub is_favorite: bool,
    /// Partner workouts with exercises this week
    pub weekly_workouts: u32,
    /// Of those, completed
    pub completed_workouts: u32,
    /// Sum of the partner's completed set weights
    pub total_weight: f64,
    /// Rounded percentage
    pub completion_rate: u32,
    /// Per workout set progress, newest first
    pub weekly_progress: Vec<u32>,
    /// Completed prefix of the partner's workouts
    pub streak: u32,
    /// Caller's per workout set progress, newest first
    pub user_progress: Vec<u32>,
}

/// One completed set in the partner activity view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    /// Position in the exercise
    pub set_number: u32,
    /// Weight
    pub weight: f64,
    /// Reps
    pub reps: u32,
}

/// Sets of one exercise on one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseLog {
    /// Exercise name
    pub name: String,
    /// Sets in logging order
    pub sets: Vec<LoggedSet>,
    /// Number of sets
    pub total_sets: u32,
    /// Sum of reps
    pub total_reps: u32,
    /// Sum of weight
    pub total_weight: f64,
}

/// A partner's completed work on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    /// UTC date
    pub date: NaiveDate,
    /// Exercises, alphabetical
    pub exercises: Vec<ExerciseLog>,
}

/// A partner's completed sets for the week with overall totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartnerWorkoutLog {
    /// Days, newest first
    pub days: Vec<DailyLog>,
    /// Completed sets across all days
    pub total_sets: u32,
    /// Reps across all days
    pub total_reps: u32,
    /// Weight across all days
    pub total_weight: f64,
}

/// Best lift for an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecord {
    /// Exercise name
    pub exercise_name: String,
    /// Heaviest completed set
    pub max_weight: f64,
    /// Date of the workout holding the record
    pub date: DateTime<Utc>,
}
