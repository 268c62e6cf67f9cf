// ABOUTME: Core data models for users, workouts, partners, activity, and catalog
// ABOUTME: Re-exports the domain structs shared by the database, service, and route layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

//! # Data Models
//!
//! Plain serializable structs and enums. Database rows map onto these types in
//! `crate::database`, and route handlers serialize them directly as JSON.
//!
//! ## Core Models
//!
//! - `User`: account and profile
//! - `DailyWorkout`, `WorkoutExercise`, `ExerciseSet`: generated workouts and logged sets
//! - `Partnership`: the status-gated link between two users
//! - `ActivityEntry`, `FeedItem`: social feed
//! - `WeeklyPlan`: the in-memory weekly draft

/// Activity feed, reactions, comments
pub mod activity;
/// Exercise catalog and generator options
pub mod catalog;
/// Weekly plan drafts
pub mod draft;
/// Partnerships
pub mod partner;
/// Aggregated statistics views
pub mod stats;
/// Users, sessions, profile validation
pub mod user;
/// Workouts, exercises, sets
pub mod workout;

pub use activity::{
    ActivityEntry, Comment, FeedAuthor, FeedItem, FeedWorkout, ReactionSummary, ReactionToggle,
    ReactionType, WORKOUT_COMPLETED,
};
pub use catalog::{
    BodyPartCategory, BodyPartEquipment, BodyPartOptions, CatalogExercise, EquipmentOptions, Goal,
    NamedCount,
};
pub use draft::{DraftExercise, DraftWorkout, PlanProgress, PlanStatus, WeeklyPlan};
pub use partner::{
    AcceptedPartner, InviteResponse, PartnerLists, PartnerStatus, Partnership, PartnershipView,
};
pub use stats::{
    DailyLog, DashboardStats, ExerciseCompletion, ExerciseLog, LoggedSet, PartnerStats,
    PartnerSummary, PartnerWorkoutLog, PersonalRecord, WorkoutStats,
};
pub use user::{
    validate_email, validate_measurement, validate_non_empty, validate_password, ProfileUpdate,
    Session, User, UserSummary,
};
pub use workout::{
    DailyWorkout, Difficulty, ExerciseDetail, ExerciseSet, ExerciseInput, ExerciseSummary,
    WorkoutDetail, WorkoutExercise, WorkoutSummary, WorkoutType,
};
