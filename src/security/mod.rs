// ABOUTME: Security headers applied to every API response, plus session cookie helpers
// ABOUTME: Environment-specific header profiles mounted as tower-http set-header layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Security Headers
//!
//! The API only serves JSON, so the header set is small: no framing, no MIME
//! sniffing, a strict referrer policy, and HSTS in production.

/// Session cookie parsing and `Set-Cookie` builders
pub mod cookies;

use axum::Router;
use http::{header, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Environment;

/// Security headers configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// X-Frame-Options header value
    pub frame_options: &'static str,
    /// X-Content-Type-Options header value
    pub content_type_options: &'static str,
    /// Referrer-Policy header value
    pub referrer_policy: &'static str,
    /// Strict-Transport-Security header value (production only)
    pub hsts: Option<&'static str>,
    /// Whether session cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}

impl SecurityConfig {
    /// Pick the header profile for a deployment environment
    #[must_use]
    pub const fn for_environment(environment: Environment) -> Self {
        if environment.is_production() {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Development profile: plain HTTP, no HSTS
    #[must_use]
    pub const fn development() -> Self {
        Self {
            frame_options: "DENY",
            content_type_options: "nosniff",
            referrer_policy: "strict-origin-when-cross-origin",
            hsts: None,
            secure_cookies: false,
        }
    }

    /// Production profile
    #[must_use]
    pub const fn production() -> Self {
        Self {
            frame_options: "DENY",
            content_type_options: "nosniff",
            referrer_policy: "strict-origin-when-cross-origin",
            hsts: Some("max-age=31536000; includeSubDomains"),
            secure_cookies: true,
        }
    }

    /// Header name/value pairs for this profile
    #[must_use]
    pub fn to_headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(self.frame_options),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static(self.content_type_options),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(self.referrer_policy),
            ),
        ];
        if let Some(hsts) = self.hsts {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(hsts),
            ));
        }
        headers
    }

    /// Layer every header of this profile onto a router
    #[must_use]
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.to_headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::if_not_present(name, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_only_in_production() {
        let dev = SecurityConfig::for_environment(Environment::Development).to_headers();
        let prod = SecurityConfig::for_environment(Environment::Production).to_headers();

        assert!(!dev
            .iter()
            .any(|(name, _)| *name == header::STRICT_TRANSPORT_SECURITY));
        assert!(prod
            .iter()
            .any(|(name, _)| *name == header::STRICT_TRANSPORT_SECURITY));
    }
}
