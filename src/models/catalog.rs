// ABOUTME: Exercise catalog models and generator option views
// ABOUTME: Goals, body part counts and categories, and per-body-part equipment counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An exercise in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogExercise {
    /// Catalog id
    pub id: Uuid,
    /// Exercise name
    pub name: String,
    /// Main muscle group (body part)
    pub main_muscle_group: Option<String>,
    /// Primary equipment
    pub primary_equipment: Option<String>,
    /// Grip style, if any
    pub grip_style: Option<String>,
}

/// Selectable training goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    /// Stable id
    pub id: String,
    /// Display name
    pub name: String,
    /// Short explanation
    pub description: String,
}

/// A named item with a count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedCount {
    /// Body part or equipment name
    pub name: String,
    /// Number of catalog exercises
    pub count: i64,
}

/// A fixed body part category with the groups present in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyPartCategory {
    /// Category name
    pub name: String,
    /// Groups in category order
    pub body_parts: Vec<NamedCount>,
}

/// Body part options for the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyPartOptions {
    /// All groups, alphabetical
    pub body_parts: Vec<NamedCount>,
    /// Groups arranged into categories
    pub categories: Vec<BodyPartCategory>,
}

/// Equipment counts for one body part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyPartEquipment {
    /// Body part name
    pub body_part: String,
    /// Equipment sorted by count descending
    pub equipment: Vec<NamedCount>,
}

/// Equipment options for a body part selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentOptions {
    /// Per body part counts
    pub by_body_part: Vec<BodyPartEquipment>,
    /// Equipment available for every selected body part
    pub common: Vec<NamedCount>,
}
