// ABOUTME: HTTP middleware for authentication, cross-origin access, and request tracing
// ABOUTME: Request authentication plus the CORS layer and span builders mounted on the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

/// Bearer/cookie session authentication
pub mod auth;
/// CORS layer configuration
pub mod cors;
/// Request spans for the trace layer
pub mod tracing;

pub use auth::{extract_token, AuthMiddleware, TokenSource};
pub use cors::setup_cors;
pub use self::tracing::{make_request_span, record_response};
