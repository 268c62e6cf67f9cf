// ABOUTME: Authentication route handlers: registration, login, logout, session, password reset
// ABOUTME: Issues the session token in the body and as an HttpOnly cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Authentication routes
//!
//! Sign-up and sign-in answer with `{token, expires_at, user}` and also set the
//! `auth_token` cookie, so browser clients and bearer-token clients are both
//! served. Password reset requests always answer 202.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::generate_reset_token;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::security::cookies::{auth_cookie, clear_auth_cookie};
use crate::services::accounts::{self, AuthSession, SignUpRequest};

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Password reset request payload
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetRequest {
    /// Account email
    pub email: String,
}

/// Password reset confirmation payload
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetConfirm {
    /// Token from the reset request
    pub token: String,
    /// Replacement password
    pub new_password: String,
}

/// Password reset acknowledgement
#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
    /// Human-readable status
    pub message: String,
    /// Raw token, only outside production and only for known emails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    /// Token expiry, alongside `reset_token`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/session", get(Self::handle_session))
            .route("/api/auth/me", get(Self::handle_me))
            .route("/api/auth/password-reset", post(Self::handle_reset_request))
            .route(
                "/api/auth/password-reset/confirm",
                post(Self::handle_reset_confirm),
            )
            .with_state(resources)
    }

    fn session_response(
        resources: &ServerResources,
        status: StatusCode,
        session: &AuthSession,
    ) -> Result<Response, AppError> {
        let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
        let cookie = auth_cookie(
            &session.token,
            max_age,
            resources.security.secure_cookies,
        )?;
        Ok((status, [(header::SET_COOKIE, cookie)], Json(session)).into_response())
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SignUpRequest>,
    ) -> Result<Response, AppError> {
        let session =
            accounts::sign_up(&resources.database, &resources.auth_manager, request).await?;
        Self::session_response(&resources, StatusCode::CREATED, &session)
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let session = accounts::sign_in(
            &resources.database,
            &resources.auth_manager,
            &request.email,
            &request.password,
        )
        .await?;
        Self::session_response(&resources, StatusCode::OK, &session)
    }

    /// Handle POST /api/auth/logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        accounts::sign_out(&resources.database, &auth).await?;

        Ok((
            StatusCode::OK,
            [(
                header::SET_COOKIE,
                clear_auth_cookie(resources.security.secure_cookies),
            )],
            Json(serde_json::json!({ "success": true })),
        )
            .into_response())
    }

    /// Handle GET /api/auth/session
    async fn handle_session(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let info = accounts::session_info(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(info)).into_response())
    }

    /// Handle GET /api/auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers).await?;
        let user = resources.database.get_user_required(auth.user_id).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle POST /api/auth/password-reset
    async fn handle_reset_request(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<PasswordResetRequest>,
    ) -> Result<Response, AppError> {
        let raw_token = generate_reset_token(&mut rand::thread_rng());
        let expires_at = accounts::request_password_reset(
            &resources.database,
            &resources.auth_manager,
            &request.email,
            &raw_token,
        )
        .await?;

        let expose = resources.config.expose_reset_tokens() && expires_at.is_some();
        let response = PasswordResetResponse {
            message: "If that email belongs to an account, a reset link has been sent".to_owned(),
            reset_token: expose.then_some(raw_token),
            expires_at: expires_at.filter(|_| expose),
        };
        Ok((StatusCode::ACCEPTED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/password-reset/confirm
    async fn handle_reset_confirm(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<PasswordResetConfirm>,
    ) -> Result<Response, AppError> {
        accounts::confirm_password_reset(
            &resources.database,
            &resources.auth_manager,
            &request.token,
            &request.new_password,
        )
        .await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Password updated. Please sign in again." })),
        )
            .into_response())
    }
}
