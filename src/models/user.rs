// ABOUTME: User account, profile, and session models
// ABOUTME: Profile validation rules shared by sign-up and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// A registered user with profile data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Login email, unique
    pub email: String,
    /// Public handle, unique
    pub username: String,
    /// Display name
    pub name: String,
    /// Height (unit chosen by the client)
    pub height: f64,
    /// Body weight in lbs, used as the default for bodyweight exercises
    pub weight: f64,
    /// Bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the profile last changed
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user with a fresh id and timestamps
    #[must_use]
    pub fn new(
        email: String,
        username: String,
        name: String,
        height: f64,
        weight: f64,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            name,
            height,
            weight,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public summary used in search results and partner listings
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// Minimal public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Public handle
    pub username: String,
}

/// An authenticated session, keyed by the token `jti`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session id (matches the JWT `jti` claim)
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// When the session stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New handle
    pub username: Option<String>,
    /// New height
    pub height: Option<f64>,
    /// New body weight
    pub weight: Option<f64>,
}

impl ProfileUpdate {
    /// True when no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Validate present fields with the same rules as sign-up
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank name or username, or a negative measurement
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_non_empty("name", name)?;
        }
        if let Some(username) = &self.username {
            validate_non_empty("username", username)?;
        }
        if let Some(height) = self.height {
            validate_measurement("height", height)?;
        }
        if let Some(weight) = self.weight {
            validate_measurement("weight", weight)?;
        }
        Ok(())
    }
}

/// Validate an email address
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the address has no `@` or an empty local/domain part
pub fn validate_email(email: &str) -> AppResult<()> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::invalid_input("Invalid email format")),
    }
}

/// Validate password strength
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the password is too short
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Reject blank strings
///
/// # Errors
///
/// Returns `INVALID_INPUT` naming the field
pub fn validate_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject negative or non-finite measurements
///
/// # Errors
///
/// Returns `INVALID_INPUT` naming the field
pub fn validate_measurement(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_input(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_profile_update_validation() {
        let update = ProfileUpdate {
            weight: Some(-1.0),
            ..ProfileUpdate::default()
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate {
            name: Some("  ".into()),
            ..ProfileUpdate::default()
        };
        assert!(update.validate().is_err());

        assert!(ProfileUpdate::default().is_empty());
        assert!(ProfileUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "a@b.co".into(),
            "abc".into(),
            "A B".into(),
            70.0,
            180.0,
            "secret-hash".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
