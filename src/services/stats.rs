// ABOUTME: Weekly statistics for the dashboard, workouts page, and partner comparison
// ABOUTME: Loads rows through the workout and partner managers and aggregates them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::database::workouts::CompletedSetRow;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{completion_rate, percentage, set_progress, streak, week_start, WeekStart};
use crate::models::{
    DailyLog, DashboardStats, ExerciseCompletion, ExerciseLog, LoggedSet, Partnership,
    PartnerStats, PartnerSummary, PartnerWorkoutLog, PersonalRecord, WorkoutStats,
};

/// Dashboard numbers for the week starting Sunday 00:00 UTC
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn dashboard_stats(database: &Database, user_id: Uuid) -> AppResult<DashboardStats> {
    let since = week_start(Utc::now(), WeekStart::Sunday);
    let workouts = database.workouts();

    let totals = workouts.set_totals_since(user_id, since).await?;
    let completed_workouts = workouts
        .list_workouts_since(user_id, since)
        .await?
        .iter()
        .filter(|w| w.completed)
        .count();

    Ok(DashboardStats {
        exercise_completion: ExerciseCompletion {
            total: totals.total,
            completed: totals.completed,
            rate: completion_rate(totals.completed, totals.total),
        },
        fit_fam_count: database.partners().count_accepted(user_id).await?,
        weekly_streak: u32::try_from(completed_workouts).unwrap_or(u32::MAX),
        total_weight: totals.completed_weight,
    })
}

/// Workouts page summary for the week starting Sunday 00:00 UTC, with the
/// first favorite (or first) accepted partner's progress alongside
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn workout_stats(database: &Database, user_id: Uuid) -> AppResult<WorkoutStats> {
    let since = week_start(Utc::now(), WeekStart::Sunday);
    let workouts = database.workouts();

    let (weekly, completed) = weekly_counts(database, user_id, since).await?;
    let totals = workouts.set_totals_since(user_id, since).await?;

    let partner = match database
        .partners()
        .accepted_partners(user_id)
        .await?
        .into_iter()
        .next()
    {
        Some(partner) => {
            let (partner_weekly, partner_completed) =
                weekly_counts(database, partner.id, since).await?;
            Some(PartnerSummary {
                id: partner.id,
                name: partner.name,
                completed_workouts: partner_completed,
                completion_rate: percentage(partner_completed, partner_weekly),
            })
        }
        None => None,
    };

    Ok(WorkoutStats {
        weekly_workouts: weekly,
        completed_workouts: completed,
        completion_rate: percentage(completed, weekly),
        exercise_completion: ExerciseCompletion {
            total: totals.total,
            completed: totals.completed,
            rate: completion_rate(totals.completed, totals.total),
        },
        partner,
    })
}

async fn weekly_counts(
    database: &Database,
    user_id: Uuid,
    since: chrono::DateTime<Utc>,
) -> AppResult<(u32, u32)> {
    let workouts = database
        .workouts()
        .list_workouts_since(user_id, since)
        .await?;
    let completed = workouts.iter().filter(|w| w.completed).count();
    Ok((
        u32::try_from(workouts.len()).unwrap_or(u32::MAX),
        u32::try_from(completed).unwrap_or(u32::MAX),
    ))
}

/// The accepted partnership between the caller and `partner_id`
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` when the two are not accepted partners
pub async fn require_accepted_partner(
    database: &Database,
    user_id: Uuid,
    partner_id: Uuid,
) -> AppResult<Partnership> {
    database
        .partners()
        .accepted_between(user_id, partner_id)
        .await?
        .ok_or_else(|| {
            AppError::permission_denied("Partner data requires an accepted partnership")
                .with_resource_id(partner_id.to_string())
        })
}

/// Partner comparison for the week starting Monday 00:00 UTC
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` without an accepted partnership
pub async fn partner_stats(
    database: &Database,
    user_id: Uuid,
    partner_id: Uuid,
) -> AppResult<PartnerStats> {
    let partnership = require_accepted_partner(database, user_id, partner_id).await?;
    let partner = database.get_user_required(partner_id).await?;
    let since = week_start(Utc::now(), WeekStart::Monday);
    let workouts = database.workouts();

    let rows = workouts.workout_progress_since(partner_id, since).await?;
    let own_rows = workouts.workout_progress_since(user_id, since).await?;

    let weekly = u32::try_from(rows.len()).unwrap_or(u32::MAX);
    let completed = u32::try_from(rows.iter().filter(|r| r.completed).count()).unwrap_or(u32::MAX);

    Ok(PartnerStats {
        partner_id,
        name: partner.name,
        username: partner.username,
        is_favorite: partnership.user_id == user_id && partnership.is_favorite,
        weekly_workouts: weekly,
        completed_workouts: completed,
        total_weight: rows.iter().map(|r| r.completed_weight).sum(),
        completion_rate: percentage(completed, weekly),
        weekly_progress: rows
            .iter()
            .map(|r| set_progress(r.completed_sets, r.target_sets))
            .collect(),
        streak: streak(rows.iter().map(|r| r.completed)),
        user_progress: own_rows
            .iter()
            .map(|r| set_progress(r.completed_sets, r.target_sets))
            .collect(),
    })
}

/// A partner's completed sets since Sunday 00:00 UTC grouped by day and exercise
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` without an accepted partnership
pub async fn partner_workouts(
    database: &Database,
    user_id: Uuid,
    partner_id: Uuid,
) -> AppResult<PartnerWorkoutLog> {
    require_accepted_partner(database, user_id, partner_id).await?;
    let since = week_start(Utc::now(), WeekStart::Sunday);
    let rows = database
        .workouts()
        .completed_sets(partner_id, Some(since), false)
        .await?;
    Ok(group_sets_by_day(rows))
}

/// Group completed sets (newest workout first) into days and exercises
#[must_use]
pub fn group_sets_by_day(rows: Vec<CompletedSetRow>) -> PartnerWorkoutLog {
    let mut log = PartnerWorkoutLog::default();

    for row in rows {
        let date = row.workout_date.date_naive();
        if log.days.last().map(|d| d.date) != Some(date) {
            log.days.push(DailyLog {
                date,
                exercises: Vec::new(),
            });
        }
        let Some(day) = log.days.last_mut() else {
            continue;
        };

        let index = match day.exercises.iter().position(|e| e.name == row.exercise_name) {
            Some(index) => index,
            None => {
                day.exercises.push(ExerciseLog {
                    name: row.exercise_name.clone(),
                    sets: Vec::new(),
                    total_sets: 0,
                    total_reps: 0,
                    total_weight: 0.0,
                });
                day.exercises.len() - 1
            }
        };
        let exercise = &mut day.exercises[index];
        exercise.sets.push(LoggedSet {
            set_number: row.set_number,
            weight: row.weight,
            reps: row.reps,
        });
        exercise.total_sets += 1;
        exercise.total_reps += row.reps;
        exercise.total_weight += row.weight;

        log.total_sets += 1;
        log.total_reps += row.reps;
        log.total_weight += row.weight;
    }

    for day in &mut log.days {
        day.exercises.sort_by(|a, b| a.name.cmp(&b.name));
    }
    log
}

/// Heaviest completed set per exercise name, heaviest first
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn exercise_history(
    database: &Database,
    user_id: Uuid,
) -> AppResult<Vec<PersonalRecord>> {
    let rows = database
        .workouts()
        .completed_sets(user_id, None, true)
        .await?;
    Ok(personal_records(rows))
}

/// Reduce completed sets to one record per exercise
#[must_use]
pub fn personal_records(rows: Vec<CompletedSetRow>) -> Vec<PersonalRecord> {
    let mut best: HashMap<String, PersonalRecord> = HashMap::new();
    for row in rows {
        let heavier = !matches!(
            best.get(&row.exercise_name),
            Some(current) if row.weight <= current.max_weight
        );
        if heavier {
            best.insert(
                row.exercise_name.clone(),
                PersonalRecord {
                    exercise_name: row.exercise_name,
                    max_weight: row.weight,
                    date: row.workout_date,
                },
            );
        }
    }

    let mut records: Vec<PersonalRecord> = best.into_values().collect();
    records.sort_by(|a, b| {
        b.max_weight
            .total_cmp(&a.max_weight)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn row(day: u32, hour: u32, name: &str, set_number: u32, weight: f64, reps: u32) -> CompletedSetRow {
        CompletedSetRow {
            workout_date: Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap(),
            exercise_name: name.into(),
            set_number,
            weight,
            reps,
        }
    }

    #[test]
    fn test_group_sets_by_day() {
        let rows = vec![
            row(12, 9, "Squat", 1, 100.0, 5),
            row(12, 9, "Squat", 2, 110.0, 5),
            row(12, 8, "Bench Press", 1, 80.0, 8),
            row(10, 7, "Deadlift", 1, 150.0, 3),
        ];

        let log = group_sets_by_day(rows);
        assert_eq!(log.days.len(), 2);
        assert_eq!(log.days[0].date.to_string(), "2025-03-12");
        assert_eq!(log.days[0].exercises[0].name, "Bench Press");
        let squat = &log.days[0].exercises[1];
        assert_eq!(squat.total_sets, 2);
        assert_eq!(squat.total_reps, 10);
        assert!((squat.total_weight - 210.0).abs() < f64::EPSILON);
        assert_eq!(log.total_sets, 4);
        assert_eq!(log.total_reps, 21);
        assert!((log.total_weight - 440.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_personal_records_keep_heaviest() {
        let rows = vec![
            row(12, 9, "Squat", 1, 100.0, 5),
            row(11, 9, "Squat", 1, 120.0, 5),
            row(10, 9, "Bench Press", 1, 90.0, 5),
        ];
        let records = personal_records(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].exercise_name, "Squat");
        assert!((records[0].max_weight - 120.0).abs() < f64::EPSILON);
        let expected: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
        assert_eq!(records[0].date, expected);
        assert_eq!(records[1].exercise_name, "Bench Press");
    }
}
