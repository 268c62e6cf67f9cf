// ABOUTME: Common test utilities shared by FitFam integration tests
// ABOUTME: Logging setup, in-memory resources, user factories, and partnership helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    dead_code,
    missing_docs
)]

use std::sync::{Arc, Once};

use axum::Router;
use fitfam_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    models::{ExerciseInput, InviteResponse, User, WorkoutDetail, WorkoutType},
    resources::ServerResources,
    routes::build_router,
    services::{
        accounts::{self, SignUpRequest},
        partners,
        workout_generation::{self, WorkoutRequest},
    },
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging once per test binary. Set `TEST_LOG=debug` for output.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let level = std::env::var("TEST_LOG").unwrap_or_else(|_| "warn".to_owned());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with the built-in catalog loaded
pub async fn create_test_database() -> Database {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory)
        .await
        .expect("Failed to open in-memory database");
    database
        .catalog()
        .seed_if_empty()
        .await
        .expect("Failed to seed catalog");
    database
}

/// Shared resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        Arc::new(ServerConfig::for_testing()),
    ))
}

/// Full application router, including middleware layers
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// A signed-up user and their bearer token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub const fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Sign-up payload for a handle; email is derived from it
pub fn sign_up_request(handle: &str) -> SignUpRequest {
    SignUpRequest {
        email: format!("{handle}@example.com"),
        password: "correct horse battery".to_owned(),
        name: format!("{handle} Tester"),
        username: handle.to_owned(),
        height: 70.0,
        weight: 180.0,
    }
}

/// Register a user directly through the account service
pub async fn create_user(resources: &ServerResources, handle: &str) -> TestUser {
    let session = accounts::sign_up(
        &resources.database,
        &resources.auth_manager,
        sign_up_request(handle),
    )
    .await
    .expect("Failed to sign up test user");
    TestUser {
        user: session.user,
        token: session.token,
    }
}

/// Make two users accepted partners, `inviter` being the initiator
pub async fn make_partners(resources: &ServerResources, inviter: &TestUser, invitee: &TestUser) {
    let invite = partners::send_invite(&resources.database, inviter.id(), invitee.id())
        .await
        .expect("Failed to send invite");
    partners::respond_to_invite(
        &resources.database,
        invitee.id(),
        invite.id,
        InviteResponse::Accepted,
    )
    .await
    .expect("Failed to accept invite");
}

/// Exercise input with the given name, body part, and set count
pub fn exercise(name: &str, body_part: &str, target_sets: u32) -> ExerciseInput {
    ExerciseInput {
        name: name.to_owned(),
        target_sets,
        target_reps: "8-12".to_owned(),
        body_part: body_part.to_owned(),
        notes: Some("Equipment: Dumbbell, Grip: Neutral".to_owned()),
    }
}

/// Store a two-exercise strength workout for the user
pub async fn create_workout(resources: &ServerResources, owner: &TestUser) -> WorkoutDetail {
    create_shared_workout(resources, owner, Vec::new()).await
}

/// Store a two-exercise strength workout shared with the given partners
pub async fn create_shared_workout(
    resources: &ServerResources,
    owner: &TestUser,
    shared_with: Vec<Uuid>,
) -> WorkoutDetail {
    let request = WorkoutRequest {
        workout_type: WorkoutType::Strength,
        exercises: vec![
            exercise("Dumbbell Bench Press", "Chest", 2),
            exercise("Hammer Curl", "Biceps", 1),
        ],
        is_shared: false,
        shared_with,
    };
    workout_generation::generate_workout(&resources.database, &owner.user, request)
        .await
        .expect("Failed to create workout")
}

/// Fill in every set of a workout the owner can see
pub async fn complete_workout(resources: &ServerResources, owner: &TestUser, detail: &WorkoutDetail) {
    use fitfam_server::services::workouts::{update_set, SetUpdate};

    for exercise in &detail.exercises {
        for set in &exercise.sets {
            update_set(
                &resources.database,
                owner.id(),
                set.id,
                SetUpdate {
                    weight: Some(100.0),
                    reps: Some(10),
                },
            )
            .await
            .expect("Failed to log set");
        }
    }
}
