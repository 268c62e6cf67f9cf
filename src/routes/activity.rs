// ABOUTME: Activity feed route handlers: feed paging, reactions, and comments
// ABOUTME: Entries outside the caller's feed are reported as not found
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ReactionToggle, ReactionType};
use crate::resources::ServerResources;
use crate::services::activity;

/// Feed paging parameters
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Page size, 1..=100, default 20
    pub limit: Option<i64>,
    /// Entries to skip
    pub offset: Option<i64>,
}

/// Reaction payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactionRequest {
    /// `like`, `fire`, `celebrate`, or `heart`
    pub reaction_type: ReactionType,
}

/// Reaction toggle outcome
#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    /// Whether the reaction was added or removed
    pub result: ReactionToggle,
    /// The type that was requested
    pub reaction_type: ReactionType,
}

/// Comment payload
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    /// Comment text
    pub content: String,
}

/// Activity routes implementation
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/activity", get(Self::handle_feed))
            .route("/api/activity/:id/reactions", post(Self::handle_reaction))
            .route("/api/activity/:id/comments", post(Self::handle_comment))
            .with_state(resources)
    }

    /// Handle GET /api/activity
    async fn handle_feed(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<FeedQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let items =
            activity::feed(&resources.database, auth.user_id, query.limit, query.offset).await?;
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle POST /api/activity/:id/reactions
    async fn handle_reaction(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(activity_id): Path<Uuid>,
        Json(request): Json<ReactionRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let result = activity::toggle_reaction(
            &resources.database,
            auth.user_id,
            activity_id,
            request.reaction_type,
        )
        .await?;
        let response = ReactionResponse {
            result,
            reaction_type: request.reaction_type,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/activity/:id/comments
    async fn handle_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(activity_id): Path<Uuid>,
        Json(request): Json<CommentRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let comment =
            activity::add_comment(&resources.database, auth.user_id, activity_id, &request.content)
                .await?;
        Ok((StatusCode::CREATED, Json(comment)).into_response())
    }
}
