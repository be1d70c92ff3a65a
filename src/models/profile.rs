// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! User profile model and the onboarding calorie-target calculator.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_utc_rfc3339;

/// Fixed activity tiers. There is no continuous slider; the multiplier is
/// one of four discrete values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    /// TDEE multiplier applied to the basal metabolic rate.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

/// The single stored user profile.
///
/// Created wholesale at onboarding and replaced wholesale when the user
/// re-onboards; never partially mutated. Body metrics are `None` when the
/// target was entered manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Biological sex used by the BMR formula
    pub male: Option<bool>,
    /// Activity multiplier applied to the BMR
    pub activity_factor: Option<f64>,
    /// Daily calorie target in kcal
    pub daily_target_kcal: u32,
    /// When the profile was created (RFC3339)
    pub created_at: String,
}

impl UserProfile {
    /// Build a profile from a manually entered calorie target.
    ///
    /// Returns `None` when the target is not a whole number; the
    /// onboarding action simply does not proceed.
    pub fn manual(target_kcal: &str) -> Option<Self> {
        let target: u32 = target_kcal.trim().parse().ok()?;
        Some(Self {
            weight_kg: None,
            height_cm: None,
            age: None,
            male: None,
            activity_factor: None,
            daily_target_kcal: target,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        })
    }

    /// Build a profile from body metrics, deriving the calorie target via
    /// Mifflin-St Jeor scaled by the activity tier.
    ///
    /// Returns `None` when any of weight/height/age fails to parse.
    pub fn computed(
        weight_kg: &str,
        height_cm: &str,
        age: &str,
        male: bool,
        level: ActivityLevel,
    ) -> Option<Self> {
        let weight: f64 = weight_kg.trim().parse().ok()?;
        let height: f64 = height_cm.trim().parse().ok()?;
        let age: u32 = age.trim().parse().ok()?;

        let bmr = bmr_mifflin_st_jeor(weight, height, age, male);
        // Round half away from zero, floored at 0 for degenerate inputs.
        let target = (bmr * level.multiplier()).round().max(0.0) as u32;

        Some(Self {
            weight_kg: Some(weight),
            height_cm: Some(height),
            age: Some(age),
            male: Some(male),
            activity_factor: Some(level.multiplier()),
            daily_target_kcal: target,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        })
    }
}

/// Basal metabolic rate per Mifflin-St Jeor, with the fixed sex offset
/// (+5 male, -161 female).
fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, male: bool) -> f64 {
    let sex_offset = if male { 5.0 } else { -161.0 };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + sex_offset
}
