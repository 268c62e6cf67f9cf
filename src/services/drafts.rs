// ABOUTME: In-memory per-user weekly plan drafts with last-write-wins semantics
// ABOUTME: Generates sample weeks, tracks day completion, and keeps a draft history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use dashmap::DashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::intelligence::{week_start_date, WeekStart};
use crate::models::{
    Difficulty, DraftExercise, DraftWorkout, PlanProgress, PlanStatus, WeeklyPlan,
};

/// Sample exercises per body part used to fill draft days
const SAMPLE_EXERCISES: &[(&str, &[&str])] = &[
    ("chest", &["Bench Press", "Incline Press", "Dumbbell Flyes"]),
    ("back", &["Pull-ups", "Bent Over Rows", "Lat Pulldowns"]),
    ("legs", &["Squats", "Deadlifts", "Lunges"]),
    ("shoulders", &["Shoulder Press", "Lateral Raises", "Front Raises"]),
    ("arms", &["Bicep Curls", "Tricep Extensions", "Hammer Curls"]),
    ("core", &["Planks", "Russian Twists", "Leg Raises"]),
];

const DAYS_PER_WEEK: u64 = 5;
const EXERCISES_PER_DAY: usize = 3;
const DAY_DURATION_MINUTES: u32 = 45;

#[derive(Debug, Default)]
struct UserDrafts {
    current: Option<WeeklyPlan>,
    history: Vec<WeeklyPlan>,
}

/// Process-local draft store keyed by user id
///
/// Nothing here survives a restart; each write replaces the stored plan.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    drafts: Arc<DashMap<Uuid, UserDrafts>>,
}

impl DraftStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's draft, generating a fresh week when none exists or the
    /// stored one ended before `today`
    pub fn current_week<R: Rng + ?Sized>(
        &self,
        user_id: Uuid,
        partner_id: Option<Uuid>,
        today: NaiveDate,
        rng: &mut R,
    ) -> WeeklyPlan {
        let existing = self
            .drafts
            .get(&user_id)
            .and_then(|d| d.current.clone())
            .filter(|plan| plan.week_end_date >= today);

        match existing {
            Some(plan) => plan,
            None => self.generate_new_week(user_id, partner_id, today, rng),
        }
    }

    /// Replace the draft with a new sample week and append it to history
    pub fn generate_new_week<R: Rng + ?Sized>(
        &self,
        user_id: Uuid,
        partner_id: Option<Uuid>,
        today: NaiveDate,
        rng: &mut R,
    ) -> WeeklyPlan {
        let plan = sample_week(partner_id, today, rng);
        let mut entry = self.drafts.entry(user_id).or_default();
        entry.current = Some(plan.clone());
        entry.history.push(plan.clone());
        debug!(user.id = %user_id, plan.id = %plan.id, "Generated weekly draft");
        plan
    }

    /// Replace the draft wholesale
    pub fn set_current_week(&self, user_id: Uuid, plan: WeeklyPlan) -> WeeklyPlan {
        self.drafts.entry(user_id).or_default().current = Some(plan.clone());
        plan
    }

    /// Replace one day of the draft. `Ok(None)` when there is no draft.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the draft has no day with that id
    pub fn update_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        workout: DraftWorkout,
    ) -> AppResult<Option<WeeklyPlan>> {
        self.modify(user_id, |plan| {
            let day = find_day(plan, workout_id)?;
            *day = DraftWorkout {
                id: workout_id,
                ..workout
            };
            Ok(())
        })
    }

    /// Mark one day done and refresh progress. `Ok(None)` when there is no draft.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the draft has no day with that id
    pub fn complete_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> AppResult<Option<WeeklyPlan>> {
        self.modify(user_id, |plan| {
            find_day(plan, workout_id)?.completed = true;
            refresh_progress(plan);
            Ok(())
        })
    }

    fn modify<F>(&self, user_id: Uuid, change: F) -> AppResult<Option<WeeklyPlan>>
    where
        F: FnOnce(&mut WeeklyPlan) -> AppResult<()>,
    {
        let Some(mut drafts) = self.drafts.get_mut(&user_id) else {
            return Ok(None);
        };
        let Some(plan) = drafts.current.as_mut() else {
            return Ok(None);
        };
        change(plan)?;
        Ok(Some(plan.clone()))
    }

    /// Drop the draft. Returns whether one existed.
    pub fn clear(&self, user_id: Uuid) -> bool {
        self.drafts
            .get_mut(&user_id)
            .and_then(|mut d| d.current.take())
            .is_some()
    }

    /// Every week generated for the user, oldest first
    #[must_use]
    pub fn history(&self, user_id: Uuid) -> Vec<WeeklyPlan> {
        self.drafts
            .get(&user_id)
            .map(|d| d.history.clone())
            .unwrap_or_default()
    }
}

fn find_day(plan: &mut WeeklyPlan, workout_id: Uuid) -> AppResult<&mut DraftWorkout> {
    plan.workouts
        .iter_mut()
        .find(|w| w.id == workout_id)
        .ok_or_else(|| AppError::not_found("Draft workout").with_resource_id(workout_id.to_string()))
}

fn refresh_progress(plan: &mut WeeklyPlan) {
    let completed = plan.workouts.iter().filter(|w| w.completed).count();
    let total = plan.workouts.len();
    plan.progress = PlanProgress {
        completed_workouts: u32::try_from(completed).unwrap_or(u32::MAX),
        total_workouts: u32::try_from(total).unwrap_or(u32::MAX),
        last_updated: Utc::now(),
    };
    plan.status = if completed == total {
        PlanStatus::Completed
    } else {
        PlanStatus::Active
    };
}

/// Build a sample week starting on the Monday of `today`'s week
pub fn sample_week<R: Rng + ?Sized>(
    partner_id: Option<Uuid>,
    today: NaiveDate,
    rng: &mut R,
) -> WeeklyPlan {
    let start = week_start_date(today, WeekStart::Monday);
    let end = start + Days::new(6);

    let workouts: Vec<DraftWorkout> = (0..DAYS_PER_WEEK)
        .map(|index| DraftWorkout {
            id: Uuid::new_v4(),
            date: start + Days::new(index),
            title: format!("Day {} Workout", index + 1),
            duration_minutes: DAY_DURATION_MINUTES,
            difficulty: random_difficulty(rng),
            exercises: sample_exercises(rng),
            completed: false,
        })
        .collect();

    WeeklyPlan {
        id: Uuid::new_v4(),
        week_start_date: start,
        week_end_date: end,
        partner_id,
        status: PlanStatus::Active,
        progress: PlanProgress {
            completed_workouts: 0,
            total_workouts: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
            last_updated: Utc::now(),
        },
        workouts,
    }
}

fn random_difficulty<R: Rng + ?Sized>(rng: &mut R) -> Difficulty {
    match rng.gen_range(0..3) {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

fn sample_exercises<R: Rng + ?Sized>(rng: &mut R) -> Vec<DraftExercise> {
    SAMPLE_EXERCISES
        .choose_multiple(rng, EXERCISES_PER_DAY)
        .filter_map(|(body_part, names)| {
            let name = names.choose(rng)?;
            Some(DraftExercise {
                id: Uuid::new_v4(),
                name: (*name).to_owned(),
                target_sets: rng.gen_range(3..=4),
                target_reps: format!("{}-{}", rng.gen_range(8..=11), rng.gen_range(10..=13)),
                body_part: (*body_part).to_owned(),
            })
        })
        .collect()
}
