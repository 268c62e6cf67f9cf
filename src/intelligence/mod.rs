// ABOUTME: Pure workout analytics: difficulty scoring, weekly aggregation, catalog options
// ABOUTME: No I/O; the service layer feeds these functions rows loaded from the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Intelligence Module
//!
//! Rule-based calculations over workouts and sets. Everything here is
//! deterministic and unit tested in isolation.

/// Body part categories and common equipment
pub mod catalog_options;
/// Week boundaries, rates, and streaks
pub mod weekly_stats;
/// Difficulty scoring and workout naming
pub mod workout_scoring;

pub use catalog_options::{arrange_categories, common_equipment, goals};
pub use weekly_stats::{
    completion_rate, percentage, set_progress, streak, week_start, week_start_date, WeekStart,
};
pub use workout_scoring::{
    catalog_notes, equipment_from_notes, estimate_duration_minutes, is_bodyweight,
    score_difficulty, with_bodyweight_note, workout_title,
};
