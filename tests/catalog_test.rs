// ABOUTME: Integration tests for the exercise catalog option endpoints
// ABOUTME: Goals, body part categories, and equipment shared across selected body parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::collections::HashSet;

use axum::http::StatusCode;
use fitfam_server::models::{BodyPartOptions, EquipmentOptions, Goal};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_catalog_requires_authentication() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::get("/api/catalog/goals")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_goals_list_strength_and_toning() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;

    let goals: Vec<Goal> = AxumTestRequest::get("/api/catalog/goals")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let names: Vec<&str> = goals.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Strength", "Toning"]);
}

#[tokio::test]
async fn test_body_parts_are_counted_and_categorized() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;

    let options: BodyPartOptions = AxumTestRequest::get("/api/catalog/body-parts")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    let chest = options
        .body_parts
        .iter()
        .find(|b| b.name == "Chest")
        .expect("Chest missing");
    assert!(chest.count > 0);

    let mut sorted = options.body_parts.clone();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(sorted, options.body_parts);

    assert!(!options.categories.is_empty());
    assert!(options
        .categories
        .iter()
        .all(|c| !c.body_parts.is_empty()));
}

#[tokio::test]
async fn test_equipment_common_to_every_selected_body_part() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;

    let options: EquipmentOptions =
        AxumTestRequest::get("/api/catalog/equipment?body_parts=Chest,Biceps")
            .bearer(&ana.token)
            .send(common::test_router(&resources))
            .await
            .assert_status(StatusCode::OK)
            .json();

    assert_eq!(options.by_body_part.len(), 2);
    assert_eq!(options.by_body_part[0].body_part, "Chest");

    let common: HashSet<&str> = options.common.iter().map(|e| e.name.as_str()).collect();
    assert!(common.contains("Dumbbell"));
    assert!(common.contains("Barbell"));
    // Kettlebell is only listed for biceps, machines only for chest
    assert!(!common.contains("Kettlebell"));
    assert!(!common.contains("Machine"));
}

#[tokio::test]
async fn test_equipment_without_selection_is_empty() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;

    let options: EquipmentOptions = AxumTestRequest::get("/api/catalog/equipment")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(options, EquipmentOptions::default());
}
