// ABOUTME: Workout partner (FitFam) route handlers
// ABOUTME: Invites, responses, favorites, partner search, and partner progress views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Partner routes
//!
//! Partner data (`/stats`, `/workouts`) is only served for accepted
//! partnerships; every other caller gets 403.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::InviteResponse;
use crate::resources::ServerResources;
use crate::routes::profile::SearchQuery;
use crate::services::{partners, stats};

/// Invite payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InviteRequest {
    /// User to invite
    pub partner_id: Uuid,
}

/// Invite response payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RespondRequest {
    /// `accepted` or `rejected`
    pub status: InviteResponse,
}

/// Favorite flag payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FavoritePartnerRequest {
    /// New flag value
    pub is_favorite: bool,
}

/// Partner routes implementation
pub struct PartnerRoutes;

impl PartnerRoutes {
    /// Create all partner routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/partners", get(Self::handle_list))
            .route("/api/partners/accepted", get(Self::handle_accepted))
            .route("/api/partners/search", get(Self::handle_search))
            .route("/api/partners/invites", post(Self::handle_send_invite))
            .route(
                "/api/partners/invites/:id",
                put(Self::handle_respond).delete(Self::handle_cancel),
            )
            .route("/api/partners/:id/stats", get(Self::handle_stats))
            .route("/api/partners/:id/workouts", get(Self::handle_workouts))
            .route("/api/partners/:id/favorite", put(Self::handle_favorite))
            .with_state(resources)
    }

    /// Handle GET /api/partners
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let lists = partners::get_partners(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(lists)).into_response())
    }

    /// Handle GET /api/partners/accepted
    async fn handle_accepted(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let accepted = partners::accepted_partners(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(accepted)).into_response())
    }

    /// Handle GET /api/partners/search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let users =
            partners::search_candidates(&resources.database, auth.user_id, &query.q).await?;
        Ok((StatusCode::OK, Json(users)).into_response())
    }

    /// Handle POST /api/partners/invites
    async fn handle_send_invite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<InviteRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let invite =
            partners::send_invite(&resources.database, auth.user_id, request.partner_id).await?;
        Ok((StatusCode::CREATED, Json(invite)).into_response())
    }

    /// Handle PUT /api/partners/invites/:id
    async fn handle_respond(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(invite_id): Path<Uuid>,
        Json(request): Json<RespondRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let invite = partners::respond_to_invite(
            &resources.database,
            auth.user_id,
            invite_id,
            request.status,
        )
        .await?;
        Ok((StatusCode::OK, Json(invite)).into_response())
    }

    /// Handle DELETE /api/partners/invites/:id
    async fn handle_cancel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(invite_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        partners::cancel_invite(&resources.database, auth.user_id, invite_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/partners/:id/stats
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(partner_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let partner_stats =
            stats::partner_stats(&resources.database, auth.user_id, partner_id).await?;
        Ok((StatusCode::OK, Json(partner_stats)).into_response())
    }

    /// Handle GET /api/partners/:id/workouts
    async fn handle_workouts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(partner_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let log = stats::partner_workouts(&resources.database, auth.user_id, partner_id).await?;
        Ok((StatusCode::OK, Json(log)).into_response())
    }

    /// Handle PUT /api/partners/:id/favorite
    async fn handle_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(partner_id): Path<Uuid>,
        Json(request): Json<FavoritePartnerRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        partners::toggle_favorite(
            &resources.database,
            auth.user_id,
            partner_id,
            request.is_favorite,
        )
        .await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "is_favorite": request.is_favorite })),
        )
            .into_response())
    }
}
