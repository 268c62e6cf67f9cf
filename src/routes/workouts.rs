// ABOUTME: Workout route handlers: generation, listings, detail, favorites, and set logging
// ABOUTME: Thin handlers that authenticate and delegate to the workout services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Workout routes
//!
//! Covers both generation paths (catalog wizard and explicit exercise list),
//! the weekly and favorite listings, per-workout detail, and the set logging
//! endpoints under `/api/exercises` and `/api/sets`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::stats;
use crate::services::workout_generation::{self, CatalogGenerationRequest, WorkoutRequest};
use crate::services::workouts::{self, SetUpdate};

/// Favorite flag payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FavoriteRequest {
    /// New flag value
    pub is_favorite: bool,
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::handle_create))
            .route("/api/workouts/generate", post(Self::handle_generate))
            .route("/api/workouts/week", get(Self::handle_week))
            .route("/api/workouts/favorites", get(Self::handle_favorites))
            .route("/api/workouts/stats", get(Self::handle_stats))
            .route("/api/workouts/history", get(Self::handle_history))
            .route(
                "/api/workouts/:id",
                get(Self::handle_get_workout).delete(Self::handle_delete_workout),
            )
            .route("/api/workouts/:id/favorite", put(Self::handle_favorite))
            .route("/api/exercises/:id", delete(Self::handle_delete_exercise))
            .route("/api/exercises/:id/sets", post(Self::handle_add_set))
            .route(
                "/api/sets/:id",
                put(Self::handle_update_set).delete(Self::handle_remove_set),
            )
            .with_state(resources)
    }

    /// Handle POST /api/workouts/generate - build a workout from the catalog
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CatalogGenerationRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let user = resources.database.get_user_required(auth.user_id).await?;
        let mut rng = StdRng::from_entropy();

        let detail = workout_generation::generate_from_catalog(
            &resources.database,
            &user,
            request,
            &mut rng,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle POST /api/workouts - store an explicit exercise list
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<WorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let user = resources.database.get_user_required(auth.user_id).await?;
        let detail = workout_generation::generate_workout(&resources.database, &user, request).await?;
        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle GET /api/workouts/week
    async fn handle_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let list = workouts::current_week_workouts(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/workouts/favorites
    async fn handle_favorites(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let list = workouts::favorite_workouts(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/workouts/stats
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let summary = stats::workout_stats(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle GET /api/workouts/history - personal records
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let records = stats::exercise_history(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let detail = workouts::workout_detail(&resources.database, auth.user_id, workout_id).await?;
        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        workouts::delete_workout(&resources.database, auth.user_id, workout_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle PUT /api/workouts/:id/favorite
    async fn handle_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
        Json(request): Json<FavoriteRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let workout = workouts::set_favorite(
            &resources.database,
            auth.user_id,
            workout_id,
            request.is_favorite,
        )
        .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /api/exercises/:id
    async fn handle_delete_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(exercise_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        workouts::delete_exercise(&resources.database, auth.user_id, exercise_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/exercises/:id/sets
    async fn handle_add_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(exercise_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let set = workouts::add_set(&resources.database, auth.user_id, exercise_id).await?;
        Ok((StatusCode::CREATED, Json(set)).into_response())
    }

    /// Handle PUT /api/sets/:id
    async fn handle_update_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(set_id): Path<Uuid>,
        Json(update): Json<SetUpdate>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let set = workouts::update_set(&resources.database, auth.user_id, set_id, update).await?;
        Ok((StatusCode::OK, Json(set)).into_response())
    }

    /// Handle DELETE /api/sets/:id
    async fn handle_remove_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(set_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        workouts::remove_set(&resources.database, auth.user_id, set_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
