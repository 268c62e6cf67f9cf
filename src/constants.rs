// ABOUTME: System-wide constants and configuration defaults for FitFam
// ABOUTME: Ports, limits, generator ranges, catalog categories, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Constants Module
//!
//! Hardcoded constants and configuration defaults, grouped by concern.

/// Port defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Default values for configuration
pub mod defaults {
    /// Default bind host
    pub const HOST: &str = "0.0.0.0";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/fitfam.db";
    /// Default session lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Default password reset token lifetime
    pub const PASSWORD_RESET_EXPIRY_MINUTES: i64 = 60;
    /// Default request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Service identity used in logs and tokens
pub mod service_names {
    /// Service name for structured logging
    pub const FITFAM_SERVER: &str = "fitfam-server";
    /// JWT audience
    pub const TOKEN_AUDIENCE: &str = "fitfam-api";
}

/// Hard limits and validation bounds
pub mod limits {
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Max rows returned by user search
    pub const USER_SEARCH_LIMIT: i64 = 10;
    /// Default feed page size
    pub const DEFAULT_FEED_LIMIT: i64 = 20;
    /// Max feed page size
    pub const MAX_FEED_LIMIT: i64 = 100;
    /// Max comment length in characters
    pub const MAX_COMMENT_LENGTH: usize = 1000;
    /// Catalog candidates fetched per body part before random selection
    pub const CATALOG_CANDIDATES_PER_BODY_PART: i64 = 10;
    /// Exercises picked per body part by the generator
    pub const EXERCISES_PER_BODY_PART: usize = 2;
    /// Estimated minutes per target set, used for workout duration
    pub const MINUTES_PER_SET: u32 = 3;
    /// Lowest bcrypt cost the hasher accepts
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt cost the hasher accepts
    pub const MAX_BCRYPT_COST: u32 = 31;
    /// Request body limit in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;
}

/// Workout generator parameter ranges per goal
pub mod generator {
    /// Strength: target sets range (inclusive)
    pub const STRENGTH_SETS: (u32, u32) = (3, 5);
    /// Strength: target reps range
    pub const STRENGTH_REPS: (u32, u32) = (6, 12);
    /// Toning: target sets range (inclusive)
    pub const TONING_SETS: (u32, u32) = (2, 3);
    /// Toning: target reps range
    pub const TONING_REPS: (u32, u32) = (12, 15);
}

/// Body part categories shown by the generator
pub mod body_parts {
    /// Upper body muscle groups
    pub const UPPER_BODY: &[&str] = &[
        "Abdominals",
        "Back",
        "Biceps",
        "Chest",
        "Forearms",
        "Shoulders",
        "Trapezius",
        "Triceps",
    ];

    /// Lower body muscle groups
    pub const LOWER_BODY: &[&str] = &[
        "Calves",
        "Glutes",
        "Hamstrings",
        "Quadriceps",
        "Adductors",
        "Hip Flexors",
    ];

    /// Category names paired with their groups, in display order
    pub const CATEGORIES: &[(&str, &[&str])] =
        &[("Upper Body", UPPER_BODY), ("Lower Body", LOWER_BODY)];
}

/// Cookie and header names
pub mod http_names {
    /// Session cookie carrying the JWT
    pub const AUTH_COOKIE: &str = "auth_token";
    /// Request correlation header
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}
