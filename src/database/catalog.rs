// ABOUTME: Exercise catalog database operations and built-in seed data
// ABOUTME: Body part and equipment counts, candidate selection for the generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::get_uuid;
use crate::constants::limits::CATALOG_CANDIDATES_PER_BODY_PART;
use crate::errors::{AppError, AppResult};
use crate::models::{BodyPartEquipment, CatalogExercise, NamedCount};

/// Built-in catalog: (name, main muscle group, primary equipment, grip style)
const SEED_EXERCISES: &[(&str, &str, &str, Option<&str>)] = &[
    // Abdominals
    ("Crunch", "Abdominals", "Bodyweight", None),
    ("Hanging Leg Raise", "Abdominals", "Bodyweight", Some("Overhand")),
    ("Cable Crunch", "Abdominals", "Cable", None),
    ("Weighted Plank", "Abdominals", "Barbell", None),
    ("Russian Twist", "Abdominals", "Dumbbell", None),
    // Back
    ("Barbell Row", "Back", "Barbell", Some("Overhand")),
    ("Deadlift", "Back", "Barbell", Some("Mixed")),
    ("One-Arm Dumbbell Row", "Back", "Dumbbell", Some("Neutral")),
    ("Lat Pulldown", "Back", "Cable", Some("Wide")),
    ("Seated Cable Row", "Back", "Cable", Some("Neutral")),
    ("Pull-Up", "Back", "Bodyweight", Some("Overhand")),
    ("Chin-Up", "Back", "Bodyweight", Some("Underhand")),
    ("Machine Row", "Back", "Machine", Some("Neutral")),
    // Biceps
    ("Barbell Curl", "Biceps", "Barbell", Some("Underhand")),
    ("Dumbbell Curl", "Biceps", "Dumbbell", Some("Underhand")),
    ("Hammer Curl", "Biceps", "Dumbbell", Some("Neutral")),
    ("Cable Curl", "Biceps", "Cable", Some("Underhand")),
    ("Kettlebell Curl", "Biceps", "Kettlebell", None),
    // Chest
    ("Barbell Bench Press", "Chest", "Barbell", Some("Overhand")),
    ("Incline Barbell Bench Press", "Chest", "Barbell", Some("Overhand")),
    ("Dumbbell Bench Press", "Chest", "Dumbbell", Some("Neutral")),
    ("Dumbbell Fly", "Chest", "Dumbbell", Some("Neutral")),
    ("Cable Crossover", "Chest", "Cable", None),
    ("Chest Press Machine", "Chest", "Machine", None),
    ("Push-Up", "Chest", "Bodyweight", None),
    // Forearms
    ("Wrist Curl", "Forearms", "Dumbbell", Some("Underhand")),
    ("Reverse Wrist Curl", "Forearms", "Barbell", Some("Overhand")),
    ("Farmer's Carry", "Forearms", "Kettlebell", Some("Neutral")),
    // Shoulders
    ("Overhead Press", "Shoulders", "Barbell", Some("Overhand")),
    ("Dumbbell Shoulder Press", "Shoulders", "Dumbbell", Some("Neutral")),
    ("Lateral Raise", "Shoulders", "Dumbbell", None),
    ("Cable Face Pull", "Shoulders", "Cable", Some("Rope")),
    ("Shoulder Press Machine", "Shoulders", "Machine", None),
    ("Pike Push-Up", "Shoulders", "Bodyweight", None),
    // Trapezius
    ("Barbell Shrug", "Trapezius", "Barbell", Some("Overhand")),
    ("Dumbbell Shrug", "Trapezius", "Dumbbell", Some("Neutral")),
    ("Upright Row", "Trapezius", "Cable", Some("Overhand")),
    // Triceps
    ("Close-Grip Bench Press", "Triceps", "Barbell", Some("Close")),
    ("Skull Crusher", "Triceps", "Barbell", Some("Overhand")),
    ("Overhead Dumbbell Extension", "Triceps", "Dumbbell", None),
    ("Tricep Pushdown", "Triceps", "Cable", Some("Rope")),
    ("Bench Dip", "Triceps", "Bodyweight", None),
    // Calves
    ("Standing Calf Raise", "Calves", "Machine", None),
    ("Seated Calf Raise", "Calves", "Machine", None),
    ("Dumbbell Calf Raise", "Calves", "Dumbbell", None),
    ("Bodyweight Calf Raise", "Calves", "Bodyweight", None),
    // Glutes
    ("Hip Thrust", "Glutes", "Barbell", None),
    ("Glute Bridge", "Glutes", "Bodyweight", None),
    ("Cable Kickback", "Glutes", "Cable", None),
    ("Kettlebell Swing", "Glutes", "Kettlebell", Some("Overhand")),
    // Hamstrings
    ("Romanian Deadlift", "Hamstrings", "Barbell", Some("Overhand")),
    ("Dumbbell Romanian Deadlift", "Hamstrings", "Dumbbell", Some("Neutral")),
    ("Lying Leg Curl", "Hamstrings", "Machine", None),
    ("Nordic Curl", "Hamstrings", "Bodyweight", None),
    // Quadriceps
    ("Back Squat", "Quadriceps", "Barbell", None),
    ("Front Squat", "Quadriceps", "Barbell", None),
    ("Goblet Squat", "Quadriceps", "Dumbbell", None),
    ("Leg Press", "Quadriceps", "Machine", None),
    ("Leg Extension", "Quadriceps", "Machine", None),
    ("Bodyweight Squat", "Quadriceps", "Bodyweight", None),
    ("Walking Lunge", "Quadriceps", "Dumbbell", Some("Neutral")),
    // Adductors
    ("Adductor Machine", "Adductors", "Machine", None),
    ("Copenhagen Plank", "Adductors", "Bodyweight", None),
    ("Cable Hip Adduction", "Adductors", "Cable", None),
    // Hip Flexors
    ("Hanging Knee Raise", "Hip Flexors", "Bodyweight", None),
    ("Cable Hip Flexion", "Hip Flexors", "Cable", None),
    ("Mountain Climber", "Hip Flexors", "Bodyweight", None),
];

/// Exercise catalog database operations manager
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of catalog rows
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM available_exercises")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count catalog: {e}")))?;
        Ok(count)
    }

    /// Insert one catalog exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert(&self, exercise: &CatalogExercise) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO available_exercises (id, name, main_muscle_group, primary_equipment, grip_style)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(exercise.id.to_string())
        .bind(&exercise.name)
        .bind(exercise.main_muscle_group.as_deref())
        .bind(exercise.primary_equipment.as_deref())
        .bind(exercise.grip_style.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert catalog exercise: {e}")))?;
        Ok(())
    }

    /// Seed the built-in catalog when the table is empty. Returns rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn seed_if_empty(&self) -> AppResult<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }
        self.seed_defaults().await
    }

    /// Delete every catalog row and insert the built-in catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn replace_with_defaults(&self) -> AppResult<usize> {
        sqlx::query("DELETE FROM available_exercises")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear catalog: {e}")))?;
        self.seed_defaults().await
    }

    async fn seed_defaults(&self) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;
        for (name, group, equipment, grip) in SEED_EXERCISES {
            sqlx::query(
                r"
                INSERT INTO available_exercises (id, name, main_muscle_group, primary_equipment, grip_style)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(*name)
            .bind(*group)
            .bind(*equipment)
            .bind(*grip)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed catalog: {e}")))?;
        }
        tx.commit().await?;

        info!(count = SEED_EXERCISES.len(), "Seeded exercise catalog");
        Ok(SEED_EXERCISES.len())
    }

    /// Exercise counts per trimmed main muscle group, alphabetical
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn body_part_counts(&self) -> AppResult<Vec<NamedCount>> {
        let rows = sqlx::query(
            r"
            SELECT TRIM(main_muscle_group) AS name, COUNT(*) AS count
            FROM available_exercises
            WHERE main_muscle_group IS NOT NULL AND TRIM(main_muscle_group) <> ''
            GROUP BY TRIM(main_muscle_group)
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count body parts: {e}")))?;

        rows.iter().map(row_to_named_count).collect()
    }

    /// Equipment counts for one body part, by count descending
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn equipment_for_body_part(&self, body_part: &str) -> AppResult<BodyPartEquipment> {
        let rows = sqlx::query(
            r"
            SELECT TRIM(primary_equipment) AS name, COUNT(*) AS count
            FROM available_exercises
            WHERE TRIM(main_muscle_group) = $1
              AND primary_equipment IS NOT NULL AND TRIM(primary_equipment) <> ''
            GROUP BY TRIM(primary_equipment)
            ORDER BY count DESC, name
            ",
        )
        .bind(body_part.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count equipment: {e}")))?;

        Ok(BodyPartEquipment {
            body_part: body_part.trim().to_owned(),
            equipment: rows
                .iter()
                .map(row_to_named_count)
                .collect::<AppResult<_>>()?,
        })
    }

    /// Up to the candidate limit of exercises for a body part using any of `equipment`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn candidates(
        &self,
        body_part: &str,
        equipment: &[String],
    ) -> AppResult<Vec<CatalogExercise>> {
        if equipment.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (0..equipment.len())
            .map(|i| format!("${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            r"
            SELECT id, name, main_muscle_group, primary_equipment, grip_style
            FROM available_exercises
            WHERE TRIM(main_muscle_group) = $1
              AND TRIM(primary_equipment) IN ({placeholders})
            ORDER BY name
            LIMIT {CATALOG_CANDIDATES_PER_BODY_PART}
            "
        );

        let mut query = sqlx::query(&sql).bind(body_part.trim());
        for item in equipment {
            query = query.bind(item.trim());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load catalog candidates: {e}")))?;

        rows.iter().map(row_to_catalog_exercise).collect()
    }
}

fn row_to_named_count(row: &SqliteRow) -> AppResult<NamedCount> {
    Ok(NamedCount {
        name: row.try_get("name")?,
        count: row.try_get("count")?,
    })
}

fn row_to_catalog_exercise(row: &SqliteRow) -> AppResult<CatalogExercise> {
    Ok(CatalogExercise {
        id: get_uuid(row, "id")?,
        name: row.try_get("name")?,
        main_muscle_group: row.try_get("main_muscle_group")?,
        primary_equipment: row.try_get("primary_equipment")?,
        grip_style: row.try_get("grip_style")?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::constants::body_parts::CATEGORIES;

    #[test]
    fn test_seed_covers_every_category_group() {
        let seeded: HashSet<&str> = SEED_EXERCISES.iter().map(|(_, g, _, _)| *g).collect();
        for (_, groups) in CATEGORIES {
            for group in *groups {
                assert!(seeded.contains(group), "missing seed for {group}");
            }
        }
    }
}
