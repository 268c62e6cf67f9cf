// ABOUTME: Request span construction for the HTTP trace layer
// ABOUTME: Carries the x-request-id header into every request span for log correlation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tracing::Span;

use crate::constants::http_names::REQUEST_ID_HEADER;

/// Request id from the incoming headers, or `-` when none was assigned
#[must_use]
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// Create a tracing span for an HTTP request
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id_of(request),
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record status and latency on the request span once the response is ready
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    span.record("duration_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
    tracing::debug!("Request finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_of() {
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id_of(&request), "abc-123");

        let bare = Request::builder().uri("/health").body(Body::empty()).unwrap();
        assert_eq!(request_id_of(&bare), "-");
    }
}
