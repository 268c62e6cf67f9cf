// ABOUTME: Notification route handler for the pending invite badge
// ABOUTME: Counts pending partnership rows addressed to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::partners;

/// Pending invite badge
#[derive(Debug, Serialize)]
pub struct PendingInvites {
    /// Invites waiting on the caller
    pub count: u32,
}

/// Notification routes implementation
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/notifications/pending-invites",
                get(Self::handle_pending_invites),
            )
            .with_state(resources)
    }

    async fn handle_pending_invites(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let count = partners::pending_invite_count(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(PendingInvites { count })).into_response())
    }
}
