// ABOUTME: Rule-based workout difficulty scoring, title formatting, and duration estimates
// ABOUTME: Threshold tables per workout type map exercise, set, and muscle group counts to a score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::constants::limits::MINUTES_PER_SET;
use crate::models::{Difficulty, ExerciseInput, WorkoutType};

/// Low/high cutoffs for one scored dimension. At or below `low` scores 0,
/// at or above `high` scores 2, anything between scores 1.
#[derive(Debug, Clone, Copy)]
struct Threshold {
    low: u32,
    high: u32,
}

impl Threshold {
    const fn score(self, value: u32) -> u32 {
        if value <= self.low {
            0
        } else if value >= self.high {
            2
        } else {
            1
        }
    }
}

const MUSCLE_GROUPS: Threshold = Threshold { low: 2, high: 4 };

const fn thresholds(workout_type: WorkoutType) -> (Threshold, Threshold) {
    match workout_type {
        WorkoutType::Strength => (
            Threshold { low: 3, high: 6 },
            Threshold { low: 15, high: 25 },
        ),
        WorkoutType::WeightLoss => (
            Threshold { low: 4, high: 7 },
            Threshold { low: 12, high: 19 },
        ),
    }
}

/// Distinct body parts in first-seen order
#[must_use]
pub fn distinct_body_parts(exercises: &[ExerciseInput]) -> Vec<&str> {
    let mut seen = HashSet::new();
    exercises
        .iter()
        .map(|e| e.body_part.as_str())
        .filter(|part| seen.insert(*part))
        .collect()
}

/// Total planned sets across exercises
#[must_use]
pub fn total_target_sets(exercises: &[ExerciseInput]) -> u32 {
    exercises.iter().map(|e| e.target_sets).sum()
}

/// Raw difficulty score in `0..=6`
#[must_use]
pub fn difficulty_score(workout_type: WorkoutType, exercises: &[ExerciseInput]) -> u32 {
    let (exercise_threshold, set_threshold) = thresholds(workout_type);
    let exercise_count = u32::try_from(exercises.len()).unwrap_or(u32::MAX);
    let group_count = u32::try_from(distinct_body_parts(exercises).len()).unwrap_or(u32::MAX);

    exercise_threshold.score(exercise_count)
        + set_threshold.score(total_target_sets(exercises))
        + MUSCLE_GROUPS.score(group_count)
}

/// Map a raw score to a difficulty bucket
#[must_use]
pub const fn difficulty_from_score(score: u32) -> Difficulty {
    match score {
        0 | 1 => Difficulty::Easy,
        s if s >= 5 => Difficulty::Hard,
        _ => Difficulty::Medium,
    }
}

/// Score a workout
#[must_use]
pub fn score_difficulty(workout_type: WorkoutType, exercises: &[ExerciseInput]) -> Difficulty {
    difficulty_from_score(difficulty_score(workout_type, exercises))
}

/// `Chest/Back (3/7/25)`
#[must_use]
pub fn workout_title(exercises: &[ExerciseInput], date: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        distinct_body_parts(exercises).join("/"),
        date.format("%-m/%-d/%y")
    )
}

/// Estimated minutes: a fixed time per planned set, never below one minute
#[must_use]
pub fn estimate_duration_minutes(exercises: &[ExerciseInput]) -> u32 {
    total_target_sets(exercises)
        .saturating_mul(MINUTES_PER_SET)
        .max(1)
}

/// Notes mention bodyweight
#[must_use]
pub fn is_bodyweight(notes: Option<&str>) -> bool {
    notes.is_some_and(|n| n.to_lowercase().contains("bodyweight"))
}

/// Notes with the bodyweight suffix appended
#[must_use]
pub fn with_bodyweight_note(notes: Option<&str>, weight: f64) -> String {
    format!("{} (Using bodyweight: {weight} lbs)", notes.unwrap_or_default())
}

/// Generator notes for a catalog exercise
#[must_use]
pub fn catalog_notes(equipment: &str, grip_style: Option<&str>) -> String {
    format!(
        "Equipment: {equipment}, Grip: {}",
        grip_style.filter(|g| !g.trim().is_empty()).unwrap_or("Any")
    )
}

/// Equipment parsed from `Equipment: X,` in notes, else `None`
#[must_use]
pub fn equipment_from_notes(notes: Option<&str>) -> String {
    notes
        .and_then(|n| n.split_once("Equipment: "))
        .and_then(|(_, rest)| rest.split_once(','))
        .map(|(equipment, _)| equipment.trim())
        .filter(|e| !e.is_empty())
        .unwrap_or("None")
        .to_owned()
}
