// ABOUTME: Session cookie helpers for browser clients
// ABOUTME: Reads the auth cookie from request headers and builds Set-Cookie values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use http::{header, HeaderMap, HeaderValue};

use crate::constants::http_names::AUTH_COOKIE;
use crate::errors::{AppError, AppResult};

/// Find a cookie value by name in the request's `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
///
/// # Errors
///
/// Returns an error if the token contains bytes not allowed in a header
pub fn auth_cookie(token: &str, max_age_secs: i64, secure: bool) -> AppResult<HeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}{secure}"
    ))
    .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))
}

/// `Set-Cookie` value that removes the session cookie
#[must_use]
pub fn clear_auth_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("auth_token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("auth_token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; other=1"),
        );
        assert_eq!(
            get_cookie_value(&headers, "auth_token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(get_cookie_value(&headers, "auth_token"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let value = auth_cookie("tok", 3600, true).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("auth_token=tok;"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Max-Age=3600"));
        assert!(text.ends_with("Secure"));
        assert!(!clear_auth_cookie(false).to_str().unwrap().contains("Secure"));
    }
}
