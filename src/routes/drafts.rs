// ABOUTME: Weekly plan draft route handlers backed by the in-memory draft store
// ABOUTME: Current week, regeneration, day replacement, day completion, and clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{DraftWorkout, WeeklyPlan};
use crate::resources::ServerResources;

/// Optional partner the generated week is planned with
#[derive(Debug, Default, Deserialize)]
pub struct PartnerQuery {
    /// Partner user id
    pub partner_id: Option<Uuid>,
}

/// Draft endpoint response; `draft` is null when no draft exists
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    /// Current draft
    pub draft: Option<WeeklyPlan>,
}

/// Draft routes implementation
pub struct DraftRoutes;

impl DraftRoutes {
    /// Create all draft routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts/draft",
                get(Self::handle_current_week)
                    .put(Self::handle_set_current_week)
                    .delete(Self::handle_clear),
            )
            .route("/api/workouts/draft/week", post(Self::handle_generate_week))
            .route(
                "/api/workouts/draft/days/:id",
                put(Self::handle_update_workout),
            )
            .route(
                "/api/workouts/draft/days/:id/complete",
                post(Self::handle_complete_workout),
            )
            .with_state(resources)
    }

    /// Handle GET /api/workouts/draft
    async fn handle_current_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PartnerQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let mut rng = StdRng::from_entropy();
        let plan = resources.drafts.current_week(
            auth.user_id,
            query.partner_id,
            Utc::now().date_naive(),
            &mut rng,
        );
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle POST /api/workouts/draft/week
    async fn handle_generate_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PartnerQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let mut rng = StdRng::from_entropy();
        let plan = resources.drafts.generate_new_week(
            auth.user_id,
            query.partner_id,
            Utc::now().date_naive(),
            &mut rng,
        );
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    /// Handle PUT /api/workouts/draft
    async fn handle_set_current_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(plan): Json<WeeklyPlan>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let plan = resources.drafts.set_current_week(auth.user_id, plan);
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle PUT /api/workouts/draft/days/:id
    async fn handle_update_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
        Json(workout): Json<DraftWorkout>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let draft = resources
            .drafts
            .update_workout(auth.user_id, workout_id, workout)?;
        Ok((StatusCode::OK, Json(DraftResponse { draft })).into_response())
    }

    /// Handle POST /api/workouts/draft/days/:id/complete
    async fn handle_complete_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let draft = resources.drafts.complete_workout(auth.user_id, workout_id)?;
        Ok((StatusCode::OK, Json(DraftResponse { draft })).into_response())
    }

    /// Handle DELETE /api/workouts/draft
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        resources.drafts.clear(auth.user_id);
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
