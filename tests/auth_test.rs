// ABOUTME: Integration tests for registration, login, sessions, and password reset
// ABOUTME: Drives the /api/auth routes through the full router with an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn register_body(handle: &str) -> Value {
    json!({
        "email": format!("{handle}@example.com"),
        "password": "correct horse battery",
        "name": "Pat Lifter",
        "username": handle,
        "height": 68.0,
        "weight": 165.0
    })
}

#[tokio::test]
async fn test_register_sets_cookie_and_hides_password_hash() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&register_body("pat"))
        .send(app)
        .await
        .assert_status(StatusCode::CREATED);

    let cookie = response.header("set-cookie").expect("Set-Cookie missing");
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "pat");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let resources = common::create_test_resources().await;

    AxumTestRequest::post("/api/auth/register")
        .json(&register_body("pat"))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let mut duplicate = register_body("pat2");
    duplicate["email"] = json!("pat@example.com");
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&duplicate)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_register_validates_fields() {
    let resources = common::create_test_resources().await;

    let mut short_password = register_body("pat");
    short_password["password"] = json!("short");
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&short_password)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);

    let mut bad_email = register_body("pat");
    bad_email["email"] = json!("not-an-email");
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&bad_email)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let resources = common::create_test_resources().await;
    common::create_user(&resources, "sam").await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "sam@example.com", "password": "wrong password here" }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "correct horse battery" }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_login_then_me_with_bearer_and_cookie() {
    let resources = common::create_test_resources().await;
    common::create_user(&resources, "sam").await;

    let body: Value = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "sam@example.com", "password": "correct horse battery" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let token = body["token"].as_str().unwrap().to_owned();

    let me: Value = AxumTestRequest::get("/api/auth/me")
        .bearer(&token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["username"], "sam");

    let me: Value = AxumTestRequest::get("/api/auth/me")
        .header("cookie", &format!("theme=dark; auth_token={token}"))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["email"], "sam@example.com");
}

#[tokio::test]
async fn test_protected_route_requires_credentials() {
    let resources = common::create_test_resources().await;

    let response = AxumTestRequest::get("/api/auth/session")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/auth/session")
        .bearer("not-a-jwt")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let resources = common::create_test_resources().await;
    let sam = common::create_user(&resources, "sam").await;

    let session: Value = AxumTestRequest::get("/api/auth/session")
        .bearer(&sam.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(session["user"]["id"], sam.id().to_string());

    let response = AxumTestRequest::post("/api/auth/logout")
        .bearer(&sam.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);
    let cleared = response.header("set-cookie").expect("Set-Cookie missing");
    assert!(cleared.contains("Max-Age=0"));

    let response = AxumTestRequest::get("/api/auth/session")
        .bearer(&sam.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let resources = common::create_test_resources().await;
    let sam = common::create_user(&resources, "sam").await;

    let body: Value = AxumTestRequest::post("/api/auth/password-reset")
        .json(&json!({ "email": "sam@example.com" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    let reset_token = body["reset_token"].as_str().unwrap().to_owned();

    AxumTestRequest::post("/api/auth/password-reset/confirm")
        .json(&json!({ "token": reset_token, "new_password": "a brand new secret" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    // Old sessions end with the reset
    let response = AxumTestRequest::get("/api/auth/me")
        .bearer(&sam.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 401);

    AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "sam@example.com", "password": "a brand new secret" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    // Tokens are single use
    let response = AxumTestRequest::post("/api/auth/password-reset/confirm")
        .json(&json!({ "token": reset_token, "new_password": "yet another secret" }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_password_reset_for_unknown_email_reveals_nothing() {
    let resources = common::create_test_resources().await;

    let body: Value = AxumTestRequest::post("/api/auth/password-reset")
        .json(&json!({ "email": "ghost@example.com" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert!(body.get("reset_token").is_none());
    assert!(body["message"].as_str().is_some());
}
