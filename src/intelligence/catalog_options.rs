// ABOUTME: Arranges catalog counts into generator options
// ABOUTME: Fixed body part categories and equipment common to a body part selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::collections::HashMap;

use crate::constants::body_parts::CATEGORIES;
use crate::models::{BodyPartCategory, BodyPartEquipment, Goal, NamedCount};

/// The two selectable goals
#[must_use]
pub fn goals() -> Vec<Goal> {
    vec![
        Goal {
            id: "1".into(),
            name: "Strength".into(),
            description: "Build muscle and increase strength with heavier weights".into(),
        },
        Goal {
            id: "2".into(),
            name: "Toning".into(),
            description: "Improve muscle definition with lighter weights and higher reps".into(),
        },
    ]
}

/// Arrange body part counts into the fixed categories. Groups absent from
/// `counts` are left out; empty categories are dropped.
#[must_use]
pub fn arrange_categories(counts: &[NamedCount]) -> Vec<BodyPartCategory> {
    let by_name: HashMap<&str, &NamedCount> =
        counts.iter().map(|c| (c.name.as_str(), c)).collect();

    CATEGORIES
        .iter()
        .map(|(category, groups)| BodyPartCategory {
            name: (*category).to_owned(),
            body_parts: groups
                .iter()
                .filter_map(|g| by_name.get(g).map(|c| (*c).clone()))
                .collect(),
        })
        .filter(|c| !c.body_parts.is_empty())
        .collect()
}

/// Equipment present for every selected body part. The count is the floored
/// average across parts; sorted by count descending, then name.
#[must_use]
pub fn common_equipment(by_body_part: &[BodyPartEquipment]) -> Vec<NamedCount> {
    let Some((first, rest)) = by_body_part.split_first() else {
        return Vec::new();
    };
    let parts = i64::try_from(by_body_part.len()).unwrap_or(i64::MAX);

    let mut common: Vec<NamedCount> = first
        .equipment
        .iter()
        .filter_map(|candidate| {
            let mut total = candidate.count;
            for other in rest {
                let found = other.equipment.iter().find(|e| e.name == candidate.name)?;
                total += found.count;
            }
            Some(NamedCount {
                name: candidate.name.clone(),
                count: total / parts,
            })
        })
        .collect();

    common.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    common
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nc(name: &str, count: i64) -> NamedCount {
        NamedCount {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn test_arrange_categories_skips_missing_groups() {
        let counts = vec![nc("Back", 4), nc("Chest", 6), nc("Glutes", 2)];
        let categories = arrange_categories(&counts);

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Upper Body");
        // Category order, not alphabetical input order
        let upper: Vec<_> = categories[0]
            .body_parts
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(upper, vec!["Back", "Chest"]);
        assert_eq!(categories[1].body_parts, vec![nc("Glutes", 2)]);
    }

    #[test]
    fn test_arrange_categories_drops_empty() {
        let categories = arrange_categories(&[nc("Chest", 1)]);
        assert_eq!(categories.len(), 1);
        assert!(arrange_categories(&[nc("Neck", 3)]).is_empty());
    }

    #[test]
    fn test_common_equipment_floor_average() {
        let selection = vec![
            BodyPartEquipment {
                body_part: "Chest".into(),
                equipment: vec![nc("Barbell", 5), nc("Dumbbell", 3), nc("Cable", 1)],
            },
            BodyPartEquipment {
                body_part: "Back".into(),
                equipment: vec![nc("Dumbbell", 4), nc("Barbell", 2)],
            },
        ];

        let common = common_equipment(&selection);
        // Barbell (5+2)/2 = 3, Dumbbell (3+4)/2 = 3, Cable missing for Back
        assert_eq!(common, vec![nc("Barbell", 3), nc("Dumbbell", 3)]);
    }

    #[test]
    fn test_common_equipment_empty_selection() {
        assert!(common_equipment(&[]).is_empty());
    }
}
