// ABOUTME: Workout database operations: daily workouts, exercises, and logged sets
// ABOUTME: Transactional workout creation, set renumbering, completion tracking, and weekly aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{format_timestamp, get_timestamp, get_u32, get_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{DailyWorkout, ExerciseSet, ExerciseSummary, WorkoutExercise};

const WORKOUT_COLUMNS: &str = "id, user_id, title, workout_type, difficulty, duration, completed, \
     is_favorite, is_shared, shared_with, created_at, updated_at";

const EXERCISE_COLUMNS: &str =
    "id, workout_id, name, target_sets, target_reps, body_part, notes, created_at";

const SET_COLUMNS: &str =
    "id, exercise_id, user_id, set_number, weight, reps, completed, created_at, updated_at";

/// An exercise to insert together with the default weight for its sets
#[derive(Debug, Clone)]
pub struct NewExercise {
    /// Exercise row
    pub exercise: WorkoutExercise,
    /// Weight pre-filled on every generated set
    pub default_weight: f64,
}

/// Result of recomputing a workout's completion flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionChange {
    /// Completion flag after the recompute
    pub completed: bool,
    /// Flag flipped from false to true in this recompute
    pub newly_completed: bool,
}

/// Set totals over a window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetTotals {
    /// Set rows
    pub total: u32,
    /// Completed set rows
    pub completed: u32,
    /// Sum of weight over completed sets
    pub completed_weight: f64,
}

/// Per workout progress row for comparisons
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutProgressRow {
    /// Workout id
    pub workout_id: Uuid,
    /// Completion flag
    pub completed: bool,
    /// Planned sets across exercises
    pub target_sets: u32,
    /// Owner's completed sets
    pub completed_sets: u32,
    /// Weight over the owner's completed sets
    pub completed_weight: f64,
}

/// A completed set with the context needed for activity and record views
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSetRow {
    /// Workout date
    pub workout_date: DateTime<Utc>,
    /// Exercise name
    pub exercise_name: String,
    /// Position in the exercise
    pub set_number: u32,
    /// Weight
    pub weight: f64,
    /// Reps
    pub reps: u32,
}

/// Workout database operations manager
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// Insert a workout with its exercises and one pending set per target set,
    /// all in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case
    pub async fn create_workout(
        &self,
        workout: &DailyWorkout,
        exercises: &[NewExercise],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let now = format_timestamp(workout.created_at);

        sqlx::query(
            r"
            INSERT INTO daily_workouts (id, user_id, title, workout_type, difficulty, duration,
                completed, is_favorite, is_shared, shared_with, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(&workout.title)
        .bind(workout.workout_type.as_str())
        .bind(workout.difficulty.as_str())
        .bind(i64::from(workout.duration_minutes))
        .bind(workout.completed)
        .bind(workout.is_favorite)
        .bind(workout.is_shared)
        .bind(serde_json::to_string(&workout.shared_with)?)
        .bind(&now)
        .bind(format_timestamp(workout.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        for (position, new_exercise) in exercises.iter().enumerate() {
            let exercise = &new_exercise.exercise;
            sqlx::query(
                r"
                INSERT INTO workout_exercises (id, workout_id, position, name, target_sets,
                    target_reps, body_part, notes, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(exercise.id.to_string())
            .bind(workout.id.to_string())
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(&exercise.name)
            .bind(i64::from(exercise.target_sets))
            .bind(&exercise.target_reps)
            .bind(&exercise.body_part)
            .bind(exercise.notes.as_deref())
            .bind(format_timestamp(exercise.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;

            for set_number in 1..=exercise.target_sets {
                sqlx::query(
                    r"
                    INSERT INTO exercise_sets (id, exercise_id, user_id, set_number, weight,
                        reps, completed, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, 0, 0, $6, $6)
                    ",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(exercise.id.to_string())
                .bind(workout.user_id.to_string())
                .bind(i64::from(set_number))
                .bind(new_exercise.default_weight)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to create set: {e}")))?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get a workout by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<DailyWorkout>> {
        let row = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM daily_workouts WHERE id = $1"
        ))
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.map(|r| row_to_workout(&r)).transpose()
    }

    /// A user's workouts dated on or after `since`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_workouts_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DailyWorkout>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {WORKOUT_COLUMNS} FROM daily_workouts
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.to_string())
        .bind(format_timestamp(since))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// A user's favorite workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_favorites(&self, user_id: Uuid) -> AppResult<Vec<DailyWorkout>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {WORKOUT_COLUMNS} FROM daily_workouts
            WHERE user_id = $1 AND is_favorite = 1
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorite workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Set the favorite flag on a workout
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn set_favorite(&self, workout_id: Uuid, is_favorite: bool) -> AppResult<()> {
        sqlx::query("UPDATE daily_workouts SET is_favorite = $2, updated_at = $3 WHERE id = $1")
            .bind(workout_id.to_string())
            .bind(is_favorite)
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update favorite: {e}")))?;
        Ok(())
    }

    /// Delete a workout; exercises and sets cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_workout(&self, workout_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM daily_workouts WHERE id = $1")
            .bind(workout_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the completion flag: true when the owner has at least one set
    /// and every owner set is completed
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the workout does not exist
    pub async fn recompute_completion(&self, workout_id: Uuid) -> AppResult<CompletionChange> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r"
            SELECT w.completed AS was_completed,
                COUNT(s.id) AS total_sets,
                COALESCE(SUM(CASE WHEN s.completed = 1 THEN 1 ELSE 0 END), 0) AS completed_sets
            FROM daily_workouts w
            LEFT JOIN workout_exercises e ON e.workout_id = w.id
            LEFT JOIN exercise_sets s ON s.exercise_id = e.id AND s.user_id = w.user_id
            WHERE w.id = $1
            GROUP BY w.id
            ",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to load workout sets: {e}")))?
        .ok_or_else(|| AppError::not_found("Workout"))?;

        let was_completed: bool = row.try_get("was_completed")?;
        let total: i64 = row.try_get("total_sets")?;
        let completed: i64 = row.try_get("completed_sets")?;
        let now_completed = total > 0 && completed == total;

        if now_completed != was_completed {
            sqlx::query("UPDATE daily_workouts SET completed = $2, updated_at = $3 WHERE id = $1")
                .bind(workout_id.to_string())
                .bind(now_completed)
                .bind(format_timestamp(Utc::now()))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to update completion: {e}")))?;
        }
        tx.commit().await?;

        Ok(CompletionChange {
            completed: now_completed,
            newly_completed: now_completed && !was_completed,
        })
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    /// Exercises of a workout in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercises(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>> {
        let rows = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM workout_exercises WHERE workout_id = $1 ORDER BY position"
        ))
        .bind(workout_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Get an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercise(&self, exercise_id: Uuid) -> AppResult<Option<WorkoutExercise>> {
        let row = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM workout_exercises WHERE id = $1"
        ))
        .bind(exercise_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

        row.map(|r| row_to_exercise(&r)).transpose()
    }

    /// Delete an exercise; its sets cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_exercise(&self, exercise_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workout_exercises WHERE id = $1")
            .bind(exercise_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete exercise: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Exercise summaries with the given user's set progress, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn exercise_summaries(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<ExerciseSummary>> {
        let rows = sqlx::query(
            r"
            SELECT e.id, e.name, e.body_part, e.target_sets, e.target_reps,
                COUNT(s.id) AS total_sets,
                COALESCE(SUM(CASE WHEN s.completed = 1 THEN 1 ELSE 0 END), 0) AS completed_sets
            FROM workout_exercises e
            LEFT JOIN exercise_sets s ON s.exercise_id = e.id AND s.user_id = $2
            WHERE e.workout_id = $1
            GROUP BY e.id
            ORDER BY e.position
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to summarize exercises: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ExerciseSummary {
                    id: get_uuid(row, "id")?,
                    name: row.try_get("name")?,
                    body_part: row.try_get("body_part")?,
                    target_sets: get_u32(row, "target_sets")?,
                    target_reps: row.try_get("target_reps")?,
                    total_sets: get_u32(row, "total_sets")?,
                    completed_sets: get_u32(row, "completed_sets")?,
                })
            })
            .collect()
    }

    // ========================================================================
    // Sets
    // ========================================================================

    /// A user's sets for one exercise, by set number
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_sets(&self, exercise_id: Uuid, user_id: Uuid) -> AppResult<Vec<ExerciseSet>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {SET_COLUMNS} FROM exercise_sets
            WHERE exercise_id = $1 AND user_id = $2
            ORDER BY set_number
            "
        ))
        .bind(exercise_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get sets: {e}")))?;

        rows.iter().map(row_to_set).collect()
    }

    /// Get a set by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_set(&self, set_id: Uuid) -> AppResult<Option<ExerciseSet>> {
        let row = sqlx::query(&format!("SELECT {SET_COLUMNS} FROM exercise_sets WHERE id = $1"))
            .bind(set_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get set: {e}")))?;

        row.map(|r| row_to_set(&r)).transpose()
    }

    /// Append a pending set numbered after the user's existing sets
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn add_set(&self, exercise_id: Uuid, user_id: Uuid) -> AppResult<ExerciseSet> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exercise_sets WHERE exercise_id = $1 AND user_id = $2",
        )
        .bind(exercise_id.to_string())
        .bind(user_id.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to count sets: {e}")))?;

        let now = Utc::now();
        let set = ExerciseSet {
            id: Uuid::new_v4(),
            exercise_id,
            user_id,
            set_number: u32::try_from(existing + 1).unwrap_or(u32::MAX),
            weight: 0.0,
            reps: 0,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO exercise_sets (id, exercise_id, user_id, set_number, weight, reps,
                completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 0, 0, 0, $5, $5)
            ",
        )
        .bind(set.id.to_string())
        .bind(exercise_id.to_string())
        .bind(user_id.to_string())
        .bind(i64::from(set.set_number))
        .bind(format_timestamp(now))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to add set: {e}")))?;

        tx.commit().await?;
        Ok(set)
    }

    /// Write weight, reps, and completion for a set
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the set does not exist
    pub async fn update_set(
        &self,
        set_id: Uuid,
        weight: f64,
        reps: u32,
        completed: bool,
    ) -> AppResult<ExerciseSet> {
        let row = sqlx::query(&format!(
            r"
            UPDATE exercise_sets SET weight = $2, reps = $3, completed = $4, updated_at = $5
            WHERE id = $1
            RETURNING {SET_COLUMNS}
            "
        ))
        .bind(set_id.to_string())
        .bind(weight)
        .bind(i64::from(reps))
        .bind(completed)
        .bind(format_timestamp(Utc::now()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update set: {e}")))?
        .ok_or_else(|| AppError::not_found("Set"))?;

        row_to_set(&row)
    }

    /// Delete a set and renumber the owner's remaining sets of that exercise to `1..=n`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the set does not exist
    pub async fn remove_set(&self, set: &ExerciseSet) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM exercise_sets WHERE id = $1")
            .bind(set.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete set: {e}")))?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Set"));
        }

        let remaining: Vec<String> = sqlx::query_scalar(
            r"
            SELECT id FROM exercise_sets
            WHERE exercise_id = $1 AND user_id = $2
            ORDER BY set_number, created_at
            ",
        )
        .bind(set.exercise_id.to_string())
        .bind(set.user_id.to_string())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to load remaining sets: {e}")))?;

        for (index, id) in remaining.iter().enumerate() {
            sqlx::query("UPDATE exercise_sets SET set_number = $2 WHERE id = $1")
                .bind(id)
                .bind(i64::try_from(index + 1).unwrap_or(i64::MAX))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to renumber sets: {e}")))?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Set totals for a user's own sets in their workouts dated since `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn set_totals_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<SetTotals> {
        let row = sqlx::query(
            r"
            SELECT COUNT(s.id) AS total,
                COALESCE(SUM(CASE WHEN s.completed = 1 THEN 1 ELSE 0 END), 0) AS completed,
                TOTAL(CASE WHEN s.completed = 1 THEN s.weight ELSE 0.0 END) AS completed_weight
            FROM exercise_sets s
            JOIN workout_exercises e ON e.id = s.exercise_id
            JOIN daily_workouts w ON w.id = e.workout_id
            WHERE w.user_id = $1 AND s.user_id = $1 AND w.created_at >= $2
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(since))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to total sets: {e}")))?;

        Ok(SetTotals {
            total: get_u32(&row, "total")?,
            completed: get_u32(&row, "completed")?,
            completed_weight: row.try_get("completed_weight")?,
        })
    }

    /// Per workout progress for a user's workouts with exercises since `since`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn workout_progress_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<WorkoutProgressRow>> {
        let rows = sqlx::query(
            r"
            SELECT w.id, w.completed,
                (SELECT COALESCE(SUM(e.target_sets), 0) FROM workout_exercises e
                    WHERE e.workout_id = w.id) AS target_sets,
                (SELECT COUNT(*) FROM exercise_sets s
                    JOIN workout_exercises e ON e.id = s.exercise_id
                    WHERE e.workout_id = w.id AND s.user_id = w.user_id AND s.completed = 1)
                    AS completed_sets,
                (SELECT TOTAL(s.weight) FROM exercise_sets s
                    JOIN workout_exercises e ON e.id = s.exercise_id
                    WHERE e.workout_id = w.id AND s.user_id = w.user_id AND s.completed = 1)
                    AS completed_weight
            FROM daily_workouts w
            WHERE w.user_id = $1 AND w.created_at >= $2
              AND EXISTS (SELECT 1 FROM workout_exercises e WHERE e.workout_id = w.id)
            ORDER BY w.created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(since))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load workout progress: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(WorkoutProgressRow {
                    workout_id: get_uuid(row, "id")?,
                    completed: row.try_get("completed")?,
                    target_sets: get_u32(row, "target_sets")?,
                    completed_sets: get_u32(row, "completed_sets")?,
                    completed_weight: row.try_get("completed_weight")?,
                })
            })
            .collect()
    }

    /// A user's completed sets, optionally limited to workouts since a date and
    /// to sets with positive weight. Newest workout first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn completed_sets(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
        weighted_only: bool,
    ) -> AppResult<Vec<CompletedSetRow>> {
        let rows = sqlx::query(
            r"
            SELECT w.created_at AS workout_date, e.name AS exercise_name,
                s.set_number, s.weight, s.reps
            FROM exercise_sets s
            JOIN workout_exercises e ON e.id = s.exercise_id
            JOIN daily_workouts w ON w.id = e.workout_id
            WHERE s.user_id = $1 AND s.completed = 1
              AND ($2 IS NULL OR w.created_at >= $2)
              AND ($3 = 0 OR s.weight > 0)
            ORDER BY w.created_at DESC, e.name, s.set_number
            ",
        )
        .bind(user_id.to_string())
        .bind(since.map(format_timestamp))
        .bind(weighted_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load completed sets: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(CompletedSetRow {
                    workout_date: get_timestamp(row, "workout_date")?,
                    exercise_name: row.try_get("exercise_name")?,
                    set_number: get_u32(row, "set_number")?,
                    weight: row.try_get("weight")?,
                    reps: get_u32(row, "reps")?,
                })
            })
            .collect()
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<DailyWorkout> {
    let workout_type: String = row.try_get("workout_type")?;
    let difficulty: String = row.try_get("difficulty")?;
    let shared_with: String = row.try_get("shared_with")?;

    Ok(DailyWorkout {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        title: row.try_get("title")?,
        workout_type: workout_type
            .parse()
            .map_err(|e: AppError| AppError::database(e.message))?,
        difficulty: difficulty
            .parse()
            .map_err(|e: AppError| AppError::database(e.message))?,
        duration_minutes: get_u32(row, "duration")?,
        completed: row.try_get("completed")?,
        is_favorite: row.try_get("is_favorite")?,
        is_shared: row.try_get("is_shared")?,
        shared_with: serde_json::from_str(&shared_with)?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    Ok(WorkoutExercise {
        id: get_uuid(row, "id")?,
        workout_id: get_uuid(row, "workout_id")?,
        name: row.try_get("name")?,
        target_sets: get_u32(row, "target_sets")?,
        target_reps: row.try_get("target_reps")?,
        body_part: row.try_get("body_part")?,
        notes: row.try_get("notes")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}

fn row_to_set(row: &SqliteRow) -> AppResult<ExerciseSet> {
    Ok(ExerciseSet {
        id: get_uuid(row, "id")?,
        exercise_id: get_uuid(row, "exercise_id")?,
        user_id: get_uuid(row, "user_id")?,
        set_number: get_u32(row, "set_number")?,
        weight: row.try_get("weight")?,
        reps: get_u32(row, "reps")?,
        completed: row.try_get("completed")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
