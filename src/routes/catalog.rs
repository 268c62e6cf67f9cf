// ABOUTME: Exercise catalog route handlers for the workout generator wizard
// ABOUTME: Goals, body part counts with categories, and equipment for a body part selection
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
use crate::intelligence::goals;
use crate::resources::ServerResources;
use crate::services::catalog;

/// `?body_parts=Chest,Back`
#[derive(Debug, Default, Deserialize)]
pub struct EquipmentQuery {
    /// Comma-separated body parts
    #[serde(default)]
    pub body_parts: String,
}

impl EquipmentQuery {
    fn body_parts(&self) -> Vec<String> {
        self.body_parts
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/catalog/goals", get(Self::handle_goals))
            .route("/api/catalog/body-parts", get(Self::handle_body_parts))
            .route("/api/catalog/equipment", get(Self::handle_equipment))
            .with_state(resources)
    }

    /// Handle GET /api/catalog/goals
    async fn handle_goals(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers).await?;
        Ok((StatusCode::OK, Json(goals())).into_response())
    }

    /// Handle GET /api/catalog/body-parts
    async fn handle_body_parts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers).await?;
        let options = catalog::body_part_options(&resources.database).await?;
        Ok((StatusCode::OK, Json(options)).into_response())
    }

    /// Handle GET /api/catalog/equipment
    async fn handle_equipment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<EquipmentQuery>,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers).await?;
        let options = catalog::equipment_options(&resources.database, &query.body_parts()).await?;
        Ok((StatusCode::OK, Json(options)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_query_splits_and_trims() {
        let query = EquipmentQuery {
            body_parts: " Chest, ,Back ".into(),
        };
        assert_eq!(query.body_parts(), vec!["Chest", "Back"]);
        assert!(EquipmentQuery::default().body_parts().is_empty());
    }
}
