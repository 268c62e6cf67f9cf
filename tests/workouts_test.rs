// ABOUTME: Integration tests for workout creation, set logging, completion, and access rules
// ABOUTME: Covers /api/workouts, /api/exercises, and /api/sets through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use fitfam_server::models::{FeedItem, WorkoutDetail, WorkoutSummary};
use fitfam_server::services::workout_generation::{self, CatalogGenerationRequest};
use helpers::axum_test::AxumTestRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_create_workout_builds_pending_sets() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;

    let detail: WorkoutDetail = AxumTestRequest::post("/api/workouts")
        .bearer(&pat.token)
        .json(&json!({
            "workout_type": "strength",
            "exercises": [
                { "name": "Barbell Row", "target_sets": 3, "target_reps": "6-8",
                  "body_part": "Back", "notes": "Equipment: Barbell, Grip: Overhand" },
                { "name": "Push-Up", "target_sets": 2, "target_reps": "10-12",
                  "body_part": "Chest", "notes": "Equipment: Bodyweight, Grip: None" }
            ]
        }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(detail.workout.user_id, pat.id());
    assert!(!detail.workout.completed);
    assert!(!detail.workout.title.is_empty());
    assert_eq!(detail.exercises.len(), 2);
    assert_eq!(detail.exercises[0].exercise.name, "Barbell Row");
    assert_eq!(detail.exercises[0].equipment, "Barbell");
    assert_eq!(detail.exercises[0].sets.len(), 3);
    assert!(detail.exercises[0].sets.iter().all(|s| !s.completed));

    // Bodyweight exercises start at the user's weight
    let push_up = &detail.exercises[1];
    assert_eq!(push_up.sets.len(), 2);
    assert!(push_up.sets.iter().all(|s| (s.weight - 180.0).abs() < f64::EPSILON));
}

#[tokio::test]
async fn test_create_workout_rejects_empty_exercise_list() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&pat.token)
        .json(&json!({ "workout_type": "strength", "exercises": [] }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_generate_from_catalog_uses_selected_equipment() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let mut rng = StdRng::seed_from_u64(7);

    let detail = workout_generation::generate_from_catalog(
        &resources.database,
        &pat.user,
        CatalogGenerationRequest {
            goal: "strength".to_owned(),
            body_parts: vec!["Chest".to_owned(), "Back".to_owned()],
            equipment: vec!["Dumbbell".to_owned()],
            share_with: Vec::new(),
        },
        &mut rng,
    )
    .await
    .unwrap();

    assert!(!detail.exercises.is_empty());
    for exercise in &detail.exercises {
        assert!(["Chest", "Back"].contains(&exercise.exercise.body_part.as_str()));
        assert_eq!(exercise.equipment, "Dumbbell");
    }
}

#[tokio::test]
async fn test_generate_requires_body_parts_and_known_goal() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;

    let response = AxumTestRequest::post("/api/workouts/generate")
        .bearer(&pat.token)
        .json(&json!({ "goal": "strength", "body_parts": [], "equipment": ["Dumbbell"] }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/workouts/generate")
        .bearer(&pat.token)
        .json(&json!({ "goal": "cardio", "body_parts": ["Chest"], "equipment": ["Dumbbell"] }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_logging_every_set_completes_workout_once() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;

    let sets: Vec<Uuid> = detail
        .exercises
        .iter()
        .flat_map(|e| e.sets.iter().map(|s| s.id))
        .collect();
    assert_eq!(sets.len(), 3);

    // A set with reps but no weight stays pending
    let set: Value = AxumTestRequest::put(&format!("/api/sets/{}", sets[0]))
        .bearer(&pat.token)
        .json(&json!({ "reps": 10 }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(set["completed"], false);

    for id in &sets {
        AxumTestRequest::put(&format!("/api/sets/{id}"))
            .bearer(&pat.token)
            .json(&json!({ "weight": 50.0, "reps": 10 }))
            .send(common::test_router(&resources))
            .await
            .assert_status(StatusCode::OK);
    }

    let reloaded: WorkoutDetail =
        AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
            .bearer(&pat.token)
            .send(common::test_router(&resources))
            .await
            .assert_status(StatusCode::OK)
            .json();
    assert!(reloaded.workout.completed);

    // Re-logging a set does not post a second completion
    AxumTestRequest::put(&format!("/api/sets/{}", sets[0]))
        .bearer(&pat.token)
        .json(&json!({ "weight": 55.0 }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    let feed: Vec<FeedItem> = AxumTestRequest::get("/api/activity")
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].activity_type, "workout_completed");
    assert_eq!(feed[0].workout.as_ref().unwrap().id, detail.workout.id);
}

#[tokio::test]
async fn test_adding_a_set_reopens_completed_workout() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;
    common::complete_workout(&resources, &pat, &detail).await;

    let exercise_id = detail.exercises[1].exercise.id;
    let set: Value = AxumTestRequest::post(&format!("/api/exercises/{exercise_id}/sets"))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(set["set_number"], 2);
    assert_eq!(set["completed"], false);

    let reloaded: WorkoutDetail =
        AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
            .bearer(&pat.token)
            .send(common::test_router(&resources))
            .await
            .json();
    assert!(!reloaded.workout.completed);

    // Removing the pending set completes it again
    let set_id = set["id"].as_str().unwrap();
    AxumTestRequest::delete(&format!("/api/sets/{set_id}"))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let reloaded: WorkoutDetail =
        AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
            .bearer(&pat.token)
            .send(common::test_router(&resources))
            .await
            .json();
    assert!(reloaded.workout.completed);
}

#[tokio::test]
async fn test_removing_a_middle_set_renumbers_the_rest() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;

    let bench = &detail.exercises[0];
    let first = bench.sets[0].id;
    let middle = bench.sets[1].id;
    let added: Value = AxumTestRequest::post(&format!("/api/exercises/{}/sets", bench.exercise.id))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(added["set_number"], 3);
    let last: Uuid = added["id"].as_str().unwrap().parse().unwrap();

    AxumTestRequest::delete(&format!("/api/sets/{middle}"))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let reloaded: WorkoutDetail =
        AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
            .bearer(&pat.token)
            .send(common::test_router(&resources))
            .await
            .assert_status(StatusCode::OK)
            .json();
    let sets = &reloaded.exercises[0].sets;
    let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
    let ids: Vec<Uuid> = sets.iter().map(|s| s.id).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(ids, vec![first, last]);
}

#[tokio::test]
async fn test_bodyweight_exercise_defaults_sets_and_annotates_notes() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;

    let detail: WorkoutDetail = AxumTestRequest::post("/api/workouts")
        .bearer(&pat.token)
        .json(&json!({
            "workout_type": "weight_loss",
            "exercises": [
                { "name": "Pull-Up", "target_sets": 2, "target_reps": "5-8",
                  "body_part": "Back", "notes": "Equipment: Bodyweight, Grip: Overhand" }
            ]
        }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let pull_up = &detail.exercises[0];
    assert_eq!(pull_up.sets.len(), 2);
    assert!(pull_up
        .sets
        .iter()
        .all(|s| (s.weight - 180.0).abs() < f64::EPSILON));
    assert!(pull_up.sets.iter().all(|s| !s.completed));
    assert_eq!(
        pull_up.exercise.notes.as_deref(),
        Some("Equipment: Bodyweight, Grip: Overhand (Using bodyweight: 180 lbs)")
    );
    assert_eq!(pull_up.equipment, "Bodyweight");
}

#[tokio::test]
async fn test_generate_fails_when_no_catalog_exercise_matches() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;

    let response = AxumTestRequest::post("/api/workouts/generate")
        .bearer(&pat.token)
        .json(&json!({ "goal": "strength", "body_parts": ["Chest"], "equipment": ["Kettlebell"] }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("No exercises found for Chest with selected equipment"));

    let listed: Vec<WorkoutSummary> = AxumTestRequest::get("/api/workouts/week")
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_negative_weight_is_rejected() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;
    let set_id = detail.exercises[0].sets[0].id;

    let response = AxumTestRequest::put(&format!("/api/sets/{set_id}"))
        .bearer(&pat.token)
        .json(&json!({ "weight": -5.0, "reps": 8 }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_strangers_cannot_see_workouts() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let eve = common::create_user(&resources, "eve").await;
    let detail = common::create_workout(&resources, &pat).await;

    let response = AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&eve.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);

    let set_id = detail.exercises[0].sets[0].id;
    let response = AxumTestRequest::put(&format!("/api/sets/{set_id}"))
        .bearer(&eve.token)
        .json(&json!({ "weight": 10.0, "reps": 10 }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 403);

    let response = AxumTestRequest::delete(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&eve.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_shared_workout_is_readable_but_not_deletable_by_partner() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let lee = common::create_user(&resources, "lee").await;
    common::make_partners(&resources, &pat, &lee).await;
    let detail = common::create_shared_workout(&resources, &pat, vec![lee.id()]).await;
    assert!(detail.workout.is_shared);

    let seen: WorkoutDetail = AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&lee.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(seen.exercises.len(), 2);
    // Sets are per user, so the partner starts with none
    assert!(seen.exercises.iter().all(|e| e.sets.is_empty()));

    let response = AxumTestRequest::delete(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&lee.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 403);

    let response = AxumTestRequest::delete(&format!(
        "/api/exercises/{}",
        detail.exercises[0].exercise.id
    ))
    .bearer(&lee.token)
    .send(common::test_router(&resources))
    .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_sharing_with_non_partner_is_rejected() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let eve = common::create_user(&resources, "eve").await;

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&pat.token)
        .json(&json!({
            "workout_type": "weight_loss",
            "exercises": [{ "name": "Crunch", "target_sets": 2, "target_reps": "15",
                            "body_part": "Abdominals" }],
            "shared_with": [eve.id()]
        }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_week_listing_and_favorites() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let first = common::create_workout(&resources, &pat).await;
    common::create_workout(&resources, &pat).await;

    let week: Vec<WorkoutSummary> = AxumTestRequest::get("/api/workouts/week")
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(week.len(), 2);
    assert_eq!(week[0].exercises.len(), 2);
    assert_eq!(week[0].exercises[0].completed_sets, 0);

    AxumTestRequest::put(&format!("/api/workouts/{}/favorite", first.workout.id))
        .bearer(&pat.token)
        .json(&json!({ "is_favorite": true }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    let favorites: Vec<WorkoutSummary> = AxumTestRequest::get("/api/workouts/favorites")
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].workout.id, first.workout.id);
}

#[tokio::test]
async fn test_delete_workout_removes_it() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;

    AxumTestRequest::delete(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = AxumTestRequest::get(&format!("/api/workouts/{}", detail.workout.id))
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_exercise_history_reports_personal_records() {
    let resources = common::create_test_resources().await;
    let pat = common::create_user(&resources, "pat").await;
    let detail = common::create_workout(&resources, &pat).await;
    common::complete_workout(&resources, &pat, &detail).await;

    let records: Vec<Value> = AxumTestRequest::get("/api/workouts/history")
        .bearer(&pat.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["max_weight"] == 100.0));
}
