// ABOUTME: Profile route handlers: read and partially update the caller's profile
// ABOUTME: Also serves the user directory search by name or username
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ProfileUpdate;
use crate::resources::ServerResources;
use crate::services::accounts;

/// `?q=` search query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring to match
    #[serde(default)]
    pub q: String,
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .route("/api/users/search", get(Self::handle_search_users))
            .with_state(resources)
    }

    /// Handle GET /api/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let user = resources.database.get_user_required(auth.user_id).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PUT /api/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let user = accounts::update_profile(&resources.database, auth.user_id, &update).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle GET /api/users/search
    async fn handle_search_users(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let users = accounts::search_users(&resources.database, auth.user_id, &query.q).await?;
        Ok((StatusCode::OK, Json(users)).into_response())
    }
}
