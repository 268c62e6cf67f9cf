// ABOUTME: Workout generation from the exercise catalog or from explicit exercise lists
// ABOUTME: Random catalog selection, difficulty scoring, titles, sharing checks, bodyweight defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Workout Generation
//!
//! The wizard path picks exercises from the catalog per body part, then both
//! paths share [`generate_workout`], which scores, names, and stores the
//! workout with one pending set per target set.

use std::collections::HashSet;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use uuid::Uuid;

use crate::constants::generator::{STRENGTH_REPS, STRENGTH_SETS, TONING_REPS, TONING_SETS};
use crate::constants::limits::EXERCISES_PER_BODY_PART;
use crate::database::workouts::NewExercise;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    catalog_notes, estimate_duration_minutes, is_bodyweight, score_difficulty,
    with_bodyweight_note, workout_title,
};
use crate::logging::AppLogger;
use crate::models::{
    CatalogExercise, DailyWorkout, ExerciseInput, User, WorkoutDetail, WorkoutExercise,
    WorkoutType,
};
use crate::services::workouts::workout_detail;

/// Generator wizard input
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogGenerationRequest {
    /// `strength`/`1` or `toning`/`2`
    #[serde(default)]
    pub goal: String,
    /// Selected body parts
    #[serde(default)]
    pub body_parts: Vec<String>,
    /// Selected equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Accepted partners to share the workout with
    #[serde(default)]
    pub share_with: Vec<Uuid>,
}

/// Explicit workout input
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutRequest {
    /// Goal the workout is for
    pub workout_type: WorkoutType,
    /// Exercises in display order
    pub exercises: Vec<ExerciseInput>,
    /// Mark as shared even with an empty partner list
    #[serde(default)]
    pub is_shared: bool,
    /// Accepted partners to share the workout with
    #[serde(default)]
    pub shared_with: Vec<Uuid>,
}

/// Sets range and reps text for a goal
const fn goal_parameters(workout_type: WorkoutType) -> ((u32, u32), (u32, u32)) {
    match workout_type {
        WorkoutType::Strength => (STRENGTH_SETS, STRENGTH_REPS),
        WorkoutType::WeightLoss => (TONING_SETS, TONING_REPS),
    }
}

/// Shuffle the candidates for one body part and turn the first few into exercise specs
pub fn pick_exercises<R: Rng + ?Sized>(
    mut candidates: Vec<CatalogExercise>,
    body_part: &str,
    workout_type: WorkoutType,
    rng: &mut R,
) -> Vec<ExerciseInput> {
    let ((min_sets, max_sets), (min_reps, max_reps)) = goal_parameters(workout_type);
    candidates.shuffle(rng);

    candidates
        .into_iter()
        .take(EXERCISES_PER_BODY_PART)
        .map(|exercise| ExerciseInput {
            notes: Some(catalog_notes(
                exercise.primary_equipment.as_deref().unwrap_or("None"),
                exercise.grip_style.as_deref(),
            )),
            name: exercise.name,
            target_sets: rng.gen_range(min_sets..=max_sets),
            target_reps: format!("{min_reps}-{max_reps}"),
            body_part: body_part.to_owned(),
        })
        .collect()
}

/// Build a workout from catalog picks for each selected body part
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a missing goal, body parts, or equipment, and
/// when a body part has no exercise for the chosen equipment
pub async fn generate_from_catalog<R: Rng + Send>(
    database: &Database,
    user: &User,
    request: CatalogGenerationRequest,
    rng: &mut R,
) -> AppResult<WorkoutDetail> {
    let workout_type = WorkoutType::from_goal(&request.goal)?;
    let body_parts: Vec<&str> = request
        .body_parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if body_parts.is_empty() {
        return Err(AppError::invalid_input("Select at least one body part"));
    }
    let equipment: Vec<String> = request
        .equipment
        .iter()
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty())
        .collect();
    if equipment.is_empty() {
        return Err(AppError::invalid_input("Select at least one equipment type"));
    }

    let catalog = database.catalog();
    let mut exercises = Vec::new();
    for body_part in body_parts {
        let candidates = catalog.candidates(body_part, &equipment).await?;
        if candidates.is_empty() {
            return Err(AppError::invalid_input(format!(
                "No exercises found for {body_part} with selected equipment. Please select different equipment."
            )));
        }
        exercises.extend(pick_exercises(candidates, body_part, workout_type, rng));
    }

    generate_workout(
        database,
        user,
        WorkoutRequest {
            workout_type,
            exercises,
            is_shared: !request.share_with.is_empty(),
            shared_with: request.share_with,
        },
    )
    .await
}

fn validate_exercises(exercises: &[ExerciseInput]) -> AppResult<()> {
    if exercises.is_empty() {
        return Err(AppError::invalid_input(
            "A workout needs at least one exercise",
        ));
    }
    for exercise in exercises {
        if exercise.name.trim().is_empty() {
            return Err(AppError::invalid_input("Exercise name must not be empty"));
        }
        if exercise.body_part.trim().is_empty() {
            return Err(AppError::invalid_input(format!(
                "Body part is required for {}",
                exercise.name
            )));
        }
        if exercise.target_sets == 0 {
            return Err(AppError::invalid_input(format!(
                "Target sets must be at least 1 for {}",
                exercise.name
            )));
        }
    }
    Ok(())
}

/// Every partner id must be an accepted partner of the user
async fn check_share_targets(
    database: &Database,
    user_id: Uuid,
    shared_with: &[Uuid],
) -> AppResult<Vec<Uuid>> {
    let mut seen = HashSet::new();
    let unique: Vec<Uuid> = shared_with
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();
    if unique.is_empty() {
        return Ok(unique);
    }

    let accepted: HashSet<Uuid> = database
        .partners()
        .accepted_partners(user_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if let Some(stranger) = unique.iter().find(|id| !accepted.contains(id)) {
        return Err(AppError::invalid_input(format!(
            "Workouts can only be shared with accepted partners: {stranger}"
        )));
    }
    Ok(unique)
}

/// Score, name, and store a workout with pending sets
///
/// # Errors
///
/// Returns `INVALID_INPUT` for an empty or malformed exercise list and for
/// share targets that are not accepted partners
pub async fn generate_workout(
    database: &Database,
    user: &User,
    request: WorkoutRequest,
) -> AppResult<WorkoutDetail> {
    validate_exercises(&request.exercises)?;
    let shared_with = check_share_targets(database, user.id, &request.shared_with).await?;

    let now = Utc::now();
    let workout = DailyWorkout {
        id: Uuid::new_v4(),
        user_id: user.id,
        title: workout_title(&request.exercises, now),
        workout_type: request.workout_type,
        difficulty: score_difficulty(request.workout_type, &request.exercises),
        duration_minutes: estimate_duration_minutes(&request.exercises),
        completed: false,
        is_favorite: false,
        is_shared: request.is_shared || !shared_with.is_empty(),
        shared_with,
        created_at: now,
        updated_at: now,
    };

    let exercises: Vec<NewExercise> = request
        .exercises
        .into_iter()
        .map(|input| {
            let use_bodyweight = is_bodyweight(input.notes.as_deref()) && user.weight > 0.0;
            let notes = if use_bodyweight {
                Some(with_bodyweight_note(input.notes.as_deref(), user.weight))
            } else {
                input.notes
            };
            NewExercise {
                exercise: WorkoutExercise {
                    id: Uuid::new_v4(),
                    workout_id: workout.id,
                    name: input.name.trim().to_owned(),
                    target_sets: input.target_sets,
                    target_reps: input.target_reps,
                    body_part: input.body_part.trim().to_owned(),
                    notes,
                    created_at: now,
                },
                default_weight: if use_bodyweight { user.weight } else { 0.0 },
            }
        })
        .collect();

    database
        .workouts()
        .create_workout(&workout, &exercises)
        .await?;
    AppLogger::log_workout_event(&user.id.to_string(), &workout.id.to_string(), "generated");
    tracing::debug!(
        title = %workout.title,
        difficulty = %workout.difficulty,
        exercises = exercises.len(),
        "Workout stored"
    );

    workout_detail(database, user.id, workout.id).await
}
