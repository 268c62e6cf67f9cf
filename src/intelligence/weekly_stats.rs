// ABOUTME: Weekly aggregation helpers: week boundaries, completion rates, streaks, set progress
// ABOUTME: All week boundaries are computed in UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Day a week starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStart {
    /// Dashboard and workouts page
    Sunday,
    /// Partner comparison and weekly drafts
    Monday,
}

/// First day of the week containing `date`
#[must_use]
pub fn week_start_date(date: NaiveDate, start: WeekStart) -> NaiveDate {
    let offset = match start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date - Duration::days(i64::from(offset))
}

/// Midnight UTC at the start of the week containing `now`
#[must_use]
pub fn week_start(now: DateTime<Utc>, start: WeekStart) -> DateTime<Utc> {
    week_start_date(now.date_naive(), start)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// `round(part / whole * 100)`, 0 when `whole` is 0
#[must_use]
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

/// Dashboard rate: `round(completed / max(total, 1) * 100)`
#[must_use]
pub fn completion_rate(completed: u32, total: u32) -> u32 {
    percentage(completed, total.max(1))
}

/// Completed prefix of a history sorted newest first. Calendar gaps are ignored.
#[must_use]
pub fn streak<I>(completed_newest_first: I) -> u32
where
    I: IntoIterator<Item = bool>,
{
    let count = completed_newest_first
        .into_iter()
        .take_while(|completed| *completed)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Per workout progress: completed sets over planned sets
#[must_use]
pub fn set_progress(completed_sets: u32, target_sets: u32) -> u32 {
    percentage(completed_sets, target_sets)
}
