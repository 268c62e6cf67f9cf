// ABOUTME: Route module organization for FitFam HTTP endpoints
// ABOUTME: Per-domain route structs merged into one router with the shared middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Route module for the FitFam server
//!
//! Each domain module defines a `XRoutes` struct whose `routes` function
//! returns a router with the shared [`ServerResources`] as state. Handlers
//! authenticate per request and delegate to the service layer.

/// Activity feed, reactions, comments
pub mod activity;
/// Registration, login, sessions, password reset
pub mod auth;
/// Exercise catalog options
pub mod catalog;
/// Dashboard statistics
pub mod dashboard;
/// Weekly plan drafts
pub mod drafts;
/// Liveness and readiness probes
pub mod health;
/// Pending invite badge
pub mod notifications;
/// Workout partners
pub mod partners;
/// Profile and user search
pub mod profile;
/// Workouts, exercises, sets
pub mod workouts;

pub use activity::ActivityRoutes;
pub use auth::AuthRoutes;
pub use catalog::CatalogRoutes;
pub use dashboard::DashboardRoutes;
pub use drafts::DraftRoutes;
pub use health::HealthRoutes;
pub use notifications::NotificationRoutes;
pub use partners::PartnerRoutes;
pub use profile::ProfileRoutes;
pub use workouts::WorkoutRoutes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::constants::limits::MAX_REQUEST_BODY_BYTES;
use crate::middleware::{make_request_span, record_response, setup_cors};
use crate::resources::ServerResources;

/// Every API route without the middleware stack
pub fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
        .merge(CatalogRoutes::routes(Arc::clone(resources)))
        .merge(DraftRoutes::routes(Arc::clone(resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(resources)))
        .merge(PartnerRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)))
        .merge(ActivityRoutes::routes(Arc::clone(resources)))
        .merge(NotificationRoutes::routes(Arc::clone(resources)))
}

/// The full application router: routes, security headers, body limit,
/// timeout, CORS, tracing, and request ids
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let router = resources.security.apply(api_routes(&resources));

    router
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            resources.config.request_timeout_secs,
        )))
        .layer(setup_cors(&resources.config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
