// ABOUTME: Integration tests for liveness, readiness, and cross-cutting response headers
// ABOUTME: Verifies probes answer without auth and every response carries a request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_service_and_version() {
    let resources = common::create_test_resources().await;

    let body: Value = AxumTestRequest::get("/health")
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_pings_database() {
    let resources = common::create_test_resources().await;

    let body: Value = AxumTestRequest::get("/ready")
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::get("/health")
        .send(common::test_router(&resources))
        .await;
    assert!(response.header("x-request-id").is_some_and(|id| !id.is_empty()));

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-me-123"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::get("/health")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(
        response.header("x-content-type-options").as_deref(),
        Some("nosniff")
    );
    assert!(response.header("x-frame-options").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::get("/api/nope")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);
}
