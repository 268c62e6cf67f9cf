// ABOUTME: Account lifecycle: sign-up, sign-in, sign-out, password reset, and profile edits
// ABOUTME: Combines password hashing, session rows, and token issuance behind one API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{hash_reset_token, AuthManager, AuthResult};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    validate_email, validate_measurement, validate_non_empty, validate_password, ProfileUpdate,
    Session, User, UserSummary,
};

/// Sign-up payload
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub name: String,
    /// Public handle
    pub username: String,
    /// Height
    #[serde(default)]
    pub height: f64,
    /// Body weight in lbs
    #[serde(default)]
    pub weight: f64,
}

impl SignUpRequest {
    /// Check every field before anything is hashed or stored
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` describing the first bad field
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_non_empty("username", &self.username)?;
        validate_non_empty("name", &self.name)?;
        validate_measurement("height", self.height)?;
        validate_measurement("weight", self.weight)
    }
}

/// A signed-in session returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// Bearer token (also set as the `auth_token` cookie)
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
    /// The signed-in user
    pub user: User,
}

/// Current session details
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    /// Session id
    pub session_id: Uuid,
    /// When the session expires
    pub expires_at: DateTime<Utc>,
    /// The signed-in user
    pub user: User,
}

/// Create an account and sign it in
///
/// # Errors
///
/// Returns `INVALID_INPUT` for bad fields and `RESOURCE_ALREADY_EXISTS` when
/// the email or username is taken
pub async fn sign_up(
    database: &Database,
    auth: &AuthManager,
    request: SignUpRequest,
) -> AppResult<AuthSession> {
    request.validate()?;

    let password_hash = auth.hash_password(&request.password).await?;
    let user = User::new(
        request.email.trim().to_lowercase(),
        request.username.trim().to_owned(),
        request.name.trim().to_owned(),
        request.height,
        request.weight,
        password_hash,
    );

    if let Err(e) = database.create_user(&user).await {
        AppLogger::log_auth_event("anonymous", "sign_up", false, Some(&e.message));
        return Err(e);
    }
    AppLogger::log_auth_event(&user.id.to_string(), "sign_up", true, None);

    start_session(database, auth, user).await
}

/// Verify credentials and open a session
///
/// # Errors
///
/// Returns `AUTH_INVALID` for an unknown email or a wrong password
pub async fn sign_in(
    database: &Database,
    auth: &AuthManager,
    email: &str,
    password: &str,
) -> AppResult<AuthSession> {
    let invalid = || AppError::auth_invalid("Invalid email or password");

    let Some(user) = database.get_user_by_email(email).await? else {
        AppLogger::log_auth_event("anonymous", "sign_in", false, Some("unknown email"));
        return Err(invalid());
    };
    if !auth.verify_password(password, &user.password_hash).await? {
        AppLogger::log_auth_event(&user.id.to_string(), "sign_in", false, Some("bad password"));
        return Err(invalid());
    }

    AppLogger::log_auth_event(&user.id.to_string(), "sign_in", true, None);
    start_session(database, auth, user).await
}

async fn start_session(
    database: &Database,
    auth: &AuthManager,
    user: User,
) -> AppResult<AuthSession> {
    let issued = auth.generate_token(&user)?;
    database
        .create_session(&Session {
            id: issued.session_id,
            user_id: user.id,
            expires_at: issued.expires_at,
            created_at: Utc::now(),
        })
        .await?;

    Ok(AuthSession {
        token: issued.token,
        expires_at: issued.expires_at,
        user,
    })
}

/// End the session behind the presented token
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn sign_out(database: &Database, auth: &AuthResult) -> AppResult<()> {
    database.delete_session(auth.session_id).await?;
    AppLogger::log_auth_event(&auth.user_id.to_string(), "sign_out", true, None);
    Ok(())
}

/// Session expiry and profile for the authenticated caller
///
/// # Errors
///
/// Returns `AUTH_INVALID` if the session ended since authentication
pub async fn session_info(database: &Database, auth: &AuthResult) -> AppResult<SessionInfo> {
    let session = database
        .get_active_session(auth.session_id)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Session has ended"))?;
    let user = database.get_user_required(auth.user_id).await?;

    Ok(SessionInfo {
        session_id: session.id,
        expires_at: session.expires_at,
        user,
    })
}

/// Store a reset token for a known email. Returns the token's expiry when
/// the email belongs to an account and `None` otherwise, so callers can keep
/// the response identical either way.
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn request_password_reset(
    database: &Database,
    auth: &AuthManager,
    email: &str,
    raw_token: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    let Some(user) = database.get_user_by_email(email).await? else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(None);
    };

    let expires_at = auth.reset_expiry();
    database
        .create_password_reset(user.id, &hash_reset_token(raw_token), expires_at)
        .await?;
    AppLogger::log_auth_event(&user.id.to_string(), "password_reset_requested", true, None);
    Ok(Some(expires_at))
}

/// Consume a reset token, set the new password, and end every session
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a weak password or an invalid, expired, or
/// already used token
pub async fn confirm_password_reset(
    database: &Database,
    auth: &AuthManager,
    token: &str,
    new_password: &str,
) -> AppResult<()> {
    validate_password(new_password)?;

    let user_id = database
        .consume_password_reset(&hash_reset_token(token.trim()))
        .await?
        .ok_or_else(|| AppError::invalid_input("Invalid or expired reset token"))?;

    let password_hash = auth.hash_password(new_password).await?;
    database.update_password_hash(user_id, &password_hash).await?;
    let ended = database.delete_user_sessions(user_id).await?;

    AppLogger::log_security_event(
        "password_reset",
        "info",
        &format!("password replaced, {ended} sessions ended"),
        Some(&user_id.to_string()),
    );
    Ok(())
}

/// Apply a partial profile update
///
/// # Errors
///
/// Returns `INVALID_INPUT` for bad fields and `RESOURCE_ALREADY_EXISTS` for a
/// username that is taken
pub async fn update_profile(
    database: &Database,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> AppResult<User> {
    if update.is_empty() {
        return database.get_user_required(user_id).await;
    }
    update.validate()?;
    database.update_profile(user_id, update).await
}

/// Name or username substring search, excluding the caller
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn search_users(
    database: &Database,
    user_id: Uuid,
    query: &str,
) -> AppResult<Vec<UserSummary>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    database.search_users_by_name(query, user_id).await
}
