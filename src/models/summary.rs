// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Daily nutrition aggregates computed from the food log.
//!
//! Always a full linear pass over the log, with no caching and no
//! incremental update. The working set is one day of food entries, which stays small.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::food::{extract_amount, FoodItem};

/// Aggregated totals for one day, measured against the calorie target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummary {
    /// The day this summary covers ("YYYY-MM-DD")
    pub date: String,
    /// Summed calories over the day's entries
    pub total_calories: f64,
    /// Summed protein (grams)
    pub protein_g: f64,
    /// Summed carbohydrates (grams)
    pub carbs_g: f64,
    /// Summed fat (grams)
    pub fat_g: f64,
    /// The profile's daily calorie target
    pub target_kcal: u32,
    /// Calories consumed over target, clamped to [0, 1]
    pub progress: f64,
}

impl DailySummary {
    /// Aggregate the entries whose date stamp equals `date`.
    ///
    /// Macro fields are raw model text; each is run through
    /// [`extract_amount`], so non-numeric values count as zero.
    pub fn compute(entries: &[FoodItem], date: &str, target_kcal: u32) -> Self {
        let mut summary = Self {
            date: date.to_string(),
            total_calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            target_kcal,
            progress: 0.0,
        };

        for item in entries.iter().filter(|e| e.date == date) {
            summary.total_calories += extract_amount(&item.calories);
            summary.protein_g += extract_amount(&item.protein);
            summary.carbs_g += extract_amount(&item.carbs);
            summary.fat_g += extract_amount(&item.fat);
        }

        if target_kcal > 0 {
            summary.progress =
                (summary.total_calories / f64::from(target_kcal)).clamp(0.0, 1.0);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::MealCategory;

    fn make_entry(id: i64, date: &str, calories: &str, protein: &str) -> FoodItem {
        FoodItem {
            id,
            name: format!("Test Food {}", id),
            calories: calories.to_string(),
            protein: protein.to_string(),
            carbs: "5g".to_string(),
            fat: "2g".to_string(),
            meal: MealCategory::Lunch,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_filters_by_date() {
        let entries = vec![
            make_entry(1, "2024-01-01", "100", "10g"),
            make_entry(2, "2024-01-02", "200", "20g"),
            make_entry(3, "2024-01-01", "50", "5g"),
        ];

        let summary = DailySummary::compute(&entries, "2024-01-01", 2000);

        assert_eq!(summary.total_calories, 150.0);
        assert_eq!(summary.protein_g, 15.0);
        assert_eq!(summary.carbs_g, 10.0);
        assert_eq!(summary.fat_g, 4.0);
    }

    #[test]
    fn test_non_numeric_macros_count_as_zero() {
        let entries = vec![make_entry(1, "2024-01-01", "unknown", "trace")];

        let summary = DailySummary::compute(&entries, "2024-01-01", 2000);

        assert_eq!(summary.total_calories, 0.0);
        assert_eq!(summary.protein_g, 0.0);
        assert_eq!(summary.progress, 0.0);
    }

    #[test]
    fn test_progress_ratio() {
        let entries = vec![make_entry(1, "2024-01-01", "500", "10g")];

        let summary = DailySummary::compute(&entries, "2024-01-01", 2000);

        assert_eq!(summary.progress, 0.25);
    }

    #[test]
    fn test_progress_clamped_when_over_target() {
        let entries = vec![make_entry(1, "2024-01-01", "5000", "10g")];

        let summary = DailySummary::compute(&entries, "2024-01-01", 2000);

        assert_eq!(summary.progress, 1.0);
    }

    #[test]
    fn test_zero_target_yields_zero_progress() {
        let entries = vec![make_entry(1, "2024-01-01", "500", "10g")];

        let summary = DailySummary::compute(&entries, "2024-01-01", 0);

        assert_eq!(summary.progress, 0.0);
    }

    #[test]
    fn test_empty_log() {
        let summary = DailySummary::compute(&[], "2024-01-01", 2000);

        assert_eq!(summary.total_calories, 0.0);
        assert_eq!(summary.progress, 0.0);
        assert_eq!(summary.target_kcal, 2000);
    }
}
