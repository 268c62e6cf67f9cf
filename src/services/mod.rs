// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Access rules, validation, and aggregation shared by the HTTP routes and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! Domain service layer
//!
//! Route handlers authenticate, parse the request, and call into these
//! functions. Services own the business rules (who may see or change what,
//! input validation, completion tracking) and talk to the database through
//! the per-domain managers.

/// Sign-up, sign-in, sessions, password reset, profile edits
pub mod accounts;

/// Activity feed paging, reactions, and comments
pub mod activity;

/// Generator options from the exercise catalog
pub mod catalog;

/// In-memory weekly plan drafts
pub mod drafts;

/// Partner invites, responses, favorites, and search
pub mod partners;

/// Dashboard, workout, and partner statistics
pub mod stats;

/// Catalog-driven and explicit workout generation
pub mod workout_generation;

/// Workout access, listings, set logging, completion
pub mod workouts;

pub use drafts::DraftStore;
