// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Food entry model, meal categories and the raw-macro amount extractor.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meal bucket within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    /// All categories in day order. The daily export enumerates these.
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snack,
    ];

    /// Human-readable label, also used in export rows.
    pub fn label(self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Dinner => "Dinner",
            MealCategory::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single logged food entry.
///
/// The macro fields hold the raw text the model returned (e.g. "12.5g").
/// They are parsed to numbers with [`extract_amount`] only when summed or
/// displayed, never normalized at storage time. The raw string is shown
/// to the user verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodItem {
    /// Unique entry id (monotonic, millisecond-clock based)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    /// Food name as reported by the model
    pub name: String,
    /// Raw calorie text (e.g. "135")
    pub calories: String,
    /// Raw protein text (e.g. "12.5g")
    pub protein: String,
    /// Raw carbohydrate text
    pub carbs: String,
    /// Raw fat text
    pub fat: String,
    /// Meal bucket within the day
    pub meal: MealCategory,
    /// Date stamp ("YYYY-MM-DD") the entry belongs to
    pub date: String,
}

/// Extract the first contiguous numeric run from a raw macro string.
///
/// Accepts at most one decimal point inside the run. Returns 0.0 when the
/// string contains no digit: absence of a number means zero quantity,
/// never an error.
pub fn extract_amount(raw: &str) -> f64 {
    let bytes = raw.as_bytes();
    let Some(start) = bytes.iter().position(|b| b.is_ascii_digit()) else {
        return 0.0;
    };

    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    raw[start..end].parse().unwrap_or(0.0)
}

// Last issued entry id. Ids must be unique within the food log even when
// several lines are parsed from one model reply in the same millisecond.
static LAST_ENTRY_ID: AtomicI64 = AtomicI64::new(0);

/// Issue a fresh entry id: the millisecond clock, bumped past any id
/// already issued this process.
pub fn next_entry_id() -> i64 {
    let now_ms = chrono::Utc::now().timestamp_millis();
    LAST_ENTRY_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(last.max(now_ms - 1) + 1)
        })
        .map_or(now_ms, |last| last.max(now_ms - 1) + 1)
}

/// Advance the id generator past `floor`, so ids persisted by an earlier
/// run are never reissued. Called when the store is opened.
pub fn reserve_entry_ids_through(floor: i64) {
    LAST_ENTRY_ID.fetch_max(floor, Ordering::SeqCst);
}
