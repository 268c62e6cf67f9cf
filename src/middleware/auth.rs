// ABOUTME: Request authentication for the REST API
// ABOUTME: Accepts a Bearer token or the auth cookie and checks the backing session row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::sync::Arc;

use http::HeaderMap;

use crate::auth::{AuthManager, AuthResult};
use crate::constants::http_names::AUTH_COOKIE;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::security::cookies::get_cookie_value;

/// Where the presented token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `Authorization: Bearer <token>`
    BearerHeader,
    /// `auth_token` cookie
    Cookie,
}

impl TokenSource {
    /// Label recorded on the tracing span
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BearerHeader => "JWT_BEARER",
            Self::Cookie => "JWT_COOKIE",
        }
    }
}

/// Pull the session token out of the request headers. The `Authorization`
/// header wins over the cookie when both are present.
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when neither is present and `AUTH_INVALID` for a
/// non-Bearer `Authorization` header
pub fn extract_token(headers: &HeaderMap) -> AppResult<(String, TokenSource)> {
    if let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return header
            .strip_prefix("Bearer ")
            .map(|token| (token.trim().to_owned(), TokenSource::BearerHeader))
            .filter(|(token, _)| !token.is_empty())
            .ok_or_else(|| {
                AppError::auth_invalid(
                    "Invalid authorization header format - must be 'Bearer <token>'",
                )
            });
    }

    get_cookie_value(headers, AUTH_COOKIE)
        .map(|token| (token, TokenSource::Cookie))
        .ok_or_else(AppError::auth_required)
}

/// Middleware for REST API authentication
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is presented
    /// - The token fails signature, audience, or expiry checks
    /// - The session referenced by the token no longer exists
    #[tracing::instrument(
        skip(self, headers),
        fields(
            auth_method = tracing::field::Empty,
            user_id = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub async fn authenticate_request(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let (token, source) = extract_token(headers)?;
        tracing::Span::current().record("auth_method", source.as_str());

        match self.authenticate_jwt_token(&token).await {
            Ok(result) => {
                tracing::Span::current()
                    .record("user_id", result.user_id.to_string())
                    .record("success", true);
                tracing::debug!("Authentication successful for user: {}", result.user_id);
                Ok(result)
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::warn!("Authentication failed: {}", e.message);
                Err(e)
            }
        }
    }

    /// Validate the JWT and require its session to be live
    async fn authenticate_jwt_token(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self.auth_manager.validate_token(token)?;

        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))?;
        let session_id = uuid::Uuid::parse_str(&claims.jti)
            .map_err(|_| AppError::auth_invalid("Invalid session ID in token"))?;

        let session = self
            .database
            .get_active_session(session_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Session has ended"))?;
        if session.user_id != user_id {
            return Err(AppError::auth_invalid("Session does not belong to token subject"));
        }

        Ok(AuthResult {
            user_id,
            session_id,
        })
    }

    /// Get reference to the auth manager
    #[must_use]
    pub const fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }
}
