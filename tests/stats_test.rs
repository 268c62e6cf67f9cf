// ABOUTME: Integration tests for dashboard, workout, and partner statistics
// ABOUTME: Builds a small week of workouts and checks the computed numbers end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use fitfam_server::models::{DashboardStats, PartnerStats, PartnerWorkoutLog, WorkoutStats};
use fitfam_server::resources::ServerResources;
use helpers::axum_test::AxumTestRequest;

struct Week {
    resources: Arc<ServerResources>,
    ana: common::TestUser,
    ben: common::TestUser,
}

/// Ana and Ben are partners. Ana has two workouts this week, the older one
/// fully logged at 100 lbs x 10 reps per set.
async fn week_with_partner() -> Week {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;
    common::make_partners(&resources, &ana, &ben).await;

    let done = common::create_workout(&resources, &ana).await;
    common::complete_workout(&resources, &ana, &done).await;
    common::create_workout(&resources, &ana).await;

    Week { resources, ana, ben }
}

#[tokio::test]
async fn test_dashboard_stats() {
    let week = week_with_partner().await;

    let stats: DashboardStats = AxumTestRequest::get("/api/dashboard/stats")
        .bearer(&week.ana.token)
        .send(common::test_router(&week.resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(stats.exercise_completion.total, 6);
    assert_eq!(stats.exercise_completion.completed, 3);
    assert_eq!(stats.exercise_completion.rate, 50);
    assert_eq!(stats.fit_fam_count, 1);
    assert_eq!(stats.weekly_streak, 1);
    assert_eq!(stats.total_weight, 300.0);
}

#[tokio::test]
async fn test_dashboard_stats_for_new_user_are_zero() {
    let resources = common::create_test_resources().await;
    let cal = common::create_user(&resources, "cal").await;

    let stats: DashboardStats = AxumTestRequest::get("/api/dashboard/stats")
        .bearer(&cal.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stats, DashboardStats::default());
}

#[tokio::test]
async fn test_workout_stats_include_first_partner() {
    let week = week_with_partner().await;

    let stats: WorkoutStats = AxumTestRequest::get("/api/workouts/stats")
        .bearer(&week.ana.token)
        .send(common::test_router(&week.resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stats.weekly_workouts, 2);
    assert_eq!(stats.completed_workouts, 1);
    assert_eq!(stats.completion_rate, 50);

    let partner = stats.partner.expect("partner summary missing");
    assert_eq!(partner.id, week.ben.id());
    assert_eq!(partner.completed_workouts, 0);
    assert_eq!(partner.completion_rate, 0);
}

#[tokio::test]
async fn test_partner_stats_compare_progress() {
    let week = week_with_partner().await;

    let stats: PartnerStats = AxumTestRequest::get(&format!(
        "/api/partners/{}/stats",
        week.ana.id()
    ))
    .bearer(&week.ben.token)
    .send(common::test_router(&week.resources))
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(stats.username, "ana");
    assert_eq!(stats.weekly_workouts, 2);
    assert_eq!(stats.completed_workouts, 1);
    assert_eq!(stats.completion_rate, 50);
    assert_eq!(stats.total_weight, 300.0);
    // Newest first: the untouched workout, then the finished one
    assert_eq!(stats.weekly_progress, vec![0, 100]);
    assert_eq!(stats.streak, 0);
    assert!(stats.user_progress.is_empty());
    assert!(!stats.is_favorite);
}

#[tokio::test]
async fn test_partner_data_requires_accepted_partnership() {
    let week = week_with_partner().await;
    let eve = common::create_user(&week.resources, "eve").await;

    for path in ["stats", "workouts"] {
        let response = AxumTestRequest::get(&format!(
            "/api/partners/{}/{path}",
            week.ana.id()
        ))
        .bearer(&eve.token)
        .send(common::test_router(&week.resources))
        .await;
        assert_eq!(response.status(), 403, "{path}");
    }
}

#[tokio::test]
async fn test_partner_workouts_group_sets_by_day() {
    let week = week_with_partner().await;

    let log: PartnerWorkoutLog = AxumTestRequest::get(&format!(
        "/api/partners/{}/workouts",
        week.ana.id()
    ))
    .bearer(&week.ben.token)
    .send(common::test_router(&week.resources))
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(log.days.len(), 1);
    let names: Vec<&str> = log.days[0].exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Dumbbell Bench Press", "Hammer Curl"]);
    assert_eq!(log.days[0].exercises[0].total_sets, 2);
    assert_eq!(log.total_sets, 3);
    assert_eq!(log.total_reps, 30);
    assert_eq!(log.total_weight, 300.0);
}
