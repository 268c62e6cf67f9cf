// ABOUTME: Generator option views built from the exercise catalog
// ABOUTME: Body part counts with categories, and equipment per selected body part
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use crate::database::Database;
use crate::errors::AppResult;
use crate::intelligence::{arrange_categories, common_equipment};
use crate::models::{BodyPartOptions, EquipmentOptions};

/// Body parts with exercise counts, alphabetical, plus the fixed categories
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn body_part_options(database: &Database) -> AppResult<BodyPartOptions> {
    let body_parts = database.catalog().body_part_counts().await?;
    Ok(BodyPartOptions {
        categories: arrange_categories(&body_parts),
        body_parts,
    })
}

/// Equipment counts for each selected body part and the equipment they share
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn equipment_options(
    database: &Database,
    body_parts: &[String],
) -> AppResult<EquipmentOptions> {
    let catalog = database.catalog();
    let mut by_body_part = Vec::new();
    for part in body_parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        by_body_part.push(catalog.equipment_for_body_part(part).await?);
    }

    Ok(EquipmentOptions {
        common: common_equipment(&by_body_part),
        by_body_part,
    })
}
