// ABOUTME: Workout access rules, listings, set logging, and completion tracking
// ABOUTME: Every set change recomputes completion and announces first completions in the feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::workouts::CompletionChange;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{equipment_from_notes, week_start, WeekStart};
use crate::logging::AppLogger;
use crate::models::{
    validate_measurement, DailyWorkout, ExerciseDetail, ExerciseSet, WorkoutDetail,
    WorkoutExercise, WorkoutSummary,
};

/// Partial set update; absent fields keep their stored value
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SetUpdate {
    /// Weight in lbs
    pub weight: Option<f64>,
    /// Repetitions
    pub reps: Option<u32>,
}

/// Whether the user may read the workout: the owner, or a user it is shared with
#[must_use]
pub fn can_view(workout: &DailyWorkout, user_id: Uuid) -> bool {
    workout.user_id == user_id || workout.shared_with.contains(&user_id)
}

/// Load a workout the user may read. Workouts the user cannot see are
/// reported as missing.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for unknown or invisible workouts
pub async fn visible_workout(
    database: &Database,
    user_id: Uuid,
    workout_id: Uuid,
) -> AppResult<DailyWorkout> {
    database
        .workouts()
        .get_workout(workout_id)
        .await?
        .filter(|w| can_view(w, user_id))
        .ok_or_else(|| AppError::not_found("Workout").with_resource_id(workout_id.to_string()))
}

/// Load a workout the user owns
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when invisible and `PERMISSION_DENIED` when
/// shared with the user but owned by someone else
pub async fn owned_workout(
    database: &Database,
    user_id: Uuid,
    workout_id: Uuid,
) -> AppResult<DailyWorkout> {
    let workout = visible_workout(database, user_id, workout_id).await?;
    if workout.user_id != user_id {
        return Err(AppError::permission_denied(
            "Only the workout owner can modify it",
        ));
    }
    Ok(workout)
}

async fn visible_exercise(
    database: &Database,
    user_id: Uuid,
    exercise_id: Uuid,
) -> AppResult<(WorkoutExercise, DailyWorkout)> {
    let exercise = database
        .workouts()
        .get_exercise(exercise_id)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise").with_resource_id(exercise_id.to_string()))?;
    let workout = visible_workout(database, user_id, exercise.workout_id)
        .await
        .map_err(|_| AppError::not_found("Exercise").with_resource_id(exercise_id.to_string()))?;
    Ok((exercise, workout))
}

async fn with_summaries(
    database: &Database,
    user_id: Uuid,
    workouts: Vec<DailyWorkout>,
) -> AppResult<Vec<WorkoutSummary>> {
    let manager = database.workouts();
    let mut summaries = Vec::with_capacity(workouts.len());
    for workout in workouts {
        let exercises = manager.exercise_summaries(workout.id, user_id).await?;
        summaries.push(WorkoutSummary { workout, exercises });
    }
    Ok(summaries)
}

/// The user's workouts since Sunday 00:00 UTC, newest first
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn current_week_workouts(
    database: &Database,
    user_id: Uuid,
) -> AppResult<Vec<WorkoutSummary>> {
    let since = week_start(Utc::now(), WeekStart::Sunday);
    let workouts = database
        .workouts()
        .list_workouts_since(user_id, since)
        .await?;
    with_summaries(database, user_id, workouts).await
}

/// The user's favorite workouts, newest first
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn favorite_workouts(
    database: &Database,
    user_id: Uuid,
) -> AppResult<Vec<WorkoutSummary>> {
    let workouts = database.workouts().list_favorites(user_id).await?;
    with_summaries(database, user_id, workouts).await
}

/// Set the favorite flag on an owned workout
///
/// # Errors
///
/// Returns an error if the workout is not the caller's or the update fails
pub async fn set_favorite(
    database: &Database,
    user_id: Uuid,
    workout_id: Uuid,
    is_favorite: bool,
) -> AppResult<DailyWorkout> {
    let mut workout = owned_workout(database, user_id, workout_id).await?;
    database
        .workouts()
        .set_favorite(workout_id, is_favorite)
        .await?;
    workout.is_favorite = is_favorite;
    Ok(workout)
}

/// Workout detail with the caller's own sets per exercise
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for unknown or invisible workouts
pub async fn workout_detail(
    database: &Database,
    user_id: Uuid,
    workout_id: Uuid,
) -> AppResult<WorkoutDetail> {
    let workout = visible_workout(database, user_id, workout_id).await?;
    let manager = database.workouts();

    let mut exercises = Vec::new();
    for exercise in manager.get_exercises(workout_id).await? {
        let sets = manager.get_sets(exercise.id, user_id).await?;
        exercises.push(ExerciseDetail {
            equipment: equipment_from_notes(exercise.notes.as_deref()),
            exercise,
            sets,
        });
    }

    Ok(WorkoutDetail { workout, exercises })
}

/// Delete an owned workout with its exercises and sets
///
/// # Errors
///
/// Returns an error if the workout is not the caller's
pub async fn delete_workout(database: &Database, user_id: Uuid, workout_id: Uuid) -> AppResult<()> {
    owned_workout(database, user_id, workout_id).await?;
    database.workouts().delete_workout(workout_id).await?;
    AppLogger::log_workout_event(&user_id.to_string(), &workout_id.to_string(), "deleted");
    Ok(())
}

/// Delete an exercise from an owned workout
///
/// # Errors
///
/// Returns an error if the parent workout is not the caller's
pub async fn delete_exercise(
    database: &Database,
    user_id: Uuid,
    exercise_id: Uuid,
) -> AppResult<()> {
    let (_, workout) = visible_exercise(database, user_id, exercise_id).await?;
    if workout.user_id != user_id {
        return Err(AppError::permission_denied(
            "Only the workout owner can remove exercises",
        ));
    }
    database.workouts().delete_exercise(exercise_id).await?;
    refresh_completion(database, workout.id).await?;
    Ok(())
}

/// Append a pending set for the caller
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` if the exercise is not visible to the caller
pub async fn add_set(database: &Database, user_id: Uuid, exercise_id: Uuid) -> AppResult<ExerciseSet> {
    let (_, workout) = visible_exercise(database, user_id, exercise_id).await?;
    let set = database.workouts().add_set(exercise_id, user_id).await?;
    refresh_completion(database, workout.id).await?;
    Ok(set)
}

async fn owned_set(
    database: &Database,
    user_id: Uuid,
    set_id: Uuid,
) -> AppResult<(ExerciseSet, Uuid)> {
    let set = database
        .workouts()
        .get_set(set_id)
        .await?
        .ok_or_else(|| AppError::not_found("Set").with_resource_id(set_id.to_string()))?;
    if set.user_id != user_id {
        return Err(AppError::permission_denied("Only the set owner can change it"));
    }
    let exercise = database
        .workouts()
        .get_exercise(set.exercise_id)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise"))?;
    Ok((set, exercise.workout_id))
}

/// Record weight and reps on one of the caller's sets. The set is completed
/// exactly when both are positive.
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for someone else's set and `INVALID_INPUT`
/// for a negative weight
pub async fn update_set(
    database: &Database,
    user_id: Uuid,
    set_id: Uuid,
    update: SetUpdate,
) -> AppResult<ExerciseSet> {
    let (set, workout_id) = owned_set(database, user_id, set_id).await?;

    let weight = update.weight.unwrap_or(set.weight);
    validate_measurement("weight", weight)?;
    let reps = update.reps.unwrap_or(set.reps);
    let completed = weight > 0.0 && reps > 0;

    let updated = database
        .workouts()
        .update_set(set_id, weight, reps, completed)
        .await?;
    refresh_completion(database, workout_id).await?;
    Ok(updated)
}

/// Delete one of the caller's sets and renumber the rest
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for someone else's set
pub async fn remove_set(database: &Database, user_id: Uuid, set_id: Uuid) -> AppResult<()> {
    let (set, workout_id) = owned_set(database, user_id, set_id).await?;
    database.workouts().remove_set(&set).await?;
    refresh_completion(database, workout_id).await?;
    Ok(())
}

/// Recompute a workout's completion and post a feed entry the first time it
/// becomes complete
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn refresh_completion(
    database: &Database,
    workout_id: Uuid,
) -> AppResult<CompletionChange> {
    let change = database.workouts().recompute_completion(workout_id).await?;
    if change.newly_completed {
        let workout = database
            .workouts()
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;
        let owner = workout.user_id.to_string();
        AppLogger::log_workout_event(&owner, &workout_id.to_string(), "completed");

        if database
            .activity()
            .record_workout_completed(workout.user_id, workout_id, &workout.title)
            .await?
            .is_some()
        {
            AppLogger::log_workout_event(&owner, &workout_id.to_string(), "announced");
        }
    }
    Ok(change)
}
