// ABOUTME: JWT session tokens, password hashing, and reset token helpers
// ABOUTME: Issues HS256 tokens bound to session rows and verifies them with detailed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Authentication and Session Tokens
//!
//! Tokens are HS256 JWTs whose `jti` is the id of a row in the `sessions`
//! table. A token is only accepted while that row exists and has not expired,
//! which is what makes sign-out and password resets revoke tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::constants::service_names::TOKEN_AUDIENCE;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => write!(
                f,
                "JWT token expired {} ago at {}",
                humanize_duration(current_time.signed_duration_since(*expired_at)),
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Session `ID`
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authenticated request context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Session backing the presented token
    pub session_id: Uuid,
}

/// Issued token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Session id embedded as `jti`
    pub session_id: Uuid,
    /// Expiry, equal to the session row's `expires_at`
    pub expires_at: DateTime<Utc>,
}

/// Authentication manager for `JWT` tokens and password hashes
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
    reset_expiry_minutes: i64,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Create a new authentication manager from the auth configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            token_expiry_hours: config.jwt_expiry_hours,
            reset_expiry_minutes: config.password_reset_expiry_minutes,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Session lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Expiry instant for a password reset token issued now
    #[must_use]
    pub fn reset_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::minutes(self.reset_expiry_minutes)
    }

    /// Generate a token for a user bound to a fresh session id
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_expiry_hours);
        let session_id = Uuid::new_v4();

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            jti: session_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: TOKEN_AUDIENCE.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken {
            token,
            session_id,
            expires_at,
        })
    }

    /// Validate a token's signature, audience, and expiry
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is malformed, has a bad
    /// signature or audience, or has expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;

        let current_time = Utc::now();
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::warn!(
                "JWT token expired for user: {} - Expired {} ago",
                claims.sub,
                humanize_duration(current_time.signed_duration_since(expired_at))
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        Ok(claims)
    }

    /// Decode claims without expiry validation so expiry can be reported in detail
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[TOKEN_AUDIENCE]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::debug!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience mismatch".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }

    /// Hash a password with bcrypt on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the blocking task panics
    pub async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Check a password against a bcrypt hash on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking task panics. A malformed hash counts
    /// as a mismatch.
    pub async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;
        Ok(verified.unwrap_or(false))
    }
}

/// Generate a random password reset token (64 hex chars)
pub fn generate_reset_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 of a reset token; only the hash is stored
#[must_use]
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
