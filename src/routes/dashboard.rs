// ABOUTME: Dashboard route handler for the caller's weekly summary numbers
// ABOUTME: Set completion, partner count, completed workouts, and weight lifted this week
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

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::stats;

/// Dashboard routes implementation
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard/stats", get(Self::handle_stats))
            .with_state(resources)
    }

    /// Handle GET /api/dashboard/stats
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let dashboard = stats::dashboard_stats(&resources.database, auth.user_id).await?;
        Ok((StatusCode::OK, Json(dashboard)).into_response())
    }
}
