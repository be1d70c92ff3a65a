// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! CSV export of the food log.
//!
//! Rows are comma-joined without quoting: the values come from the
//! model's own comma-delimited reply, so they carry no embedded commas.

use crate::models::{FoodItem, MealCategory};

/// Header shared by both export variants.
pub const EXPORT_HEADER: &str = "Date,Meal,Name,Calories,Protein,Carbs,Fat";

/// Placeholder name for meal categories with no entry on the exported day.
const NOT_ENTERED: &str = "Not Entered";

/// Full-log export: grouped by date stamp, most recent date first,
/// insertion order within a date.
pub fn export_full_log(entries: &[FoodItem]) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');

    // "YYYY-MM-DD" stamps order lexicographically.
    let mut dates: Vec<&str> = Vec::new();
    for entry in entries {
        if !dates.contains(&entry.date.as_str()) {
            dates.push(&entry.date);
        }
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));

    for date in dates {
        for entry in entries.iter().filter(|e| e.date == date) {
            push_row(&mut out, entry);
        }
    }
    out
}

/// Single-day export: the day's entries in insertion order, then one
/// "Not Entered" row per meal category absent from that day, so the file
/// always enumerates all four categories.
pub fn export_day(entries: &[FoodItem], date: &str) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');

    let day: Vec<&FoodItem> = entries.iter().filter(|e| e.date == date).collect();
    for entry in &day {
        push_row(&mut out, entry);
    }

    for meal in MealCategory::ALL {
        if !day.iter().any(|e| e.meal == meal) {
            out.push_str(&format!("{},{},{},0,0g,0g,0g\n", date, meal, NOT_ENTERED));
        }
    }
    out
}

fn push_row(out: &mut String, entry: &FoodItem) {
    out.push_str(&format!(
        "{},{},{},{},{},{},{}\n",
        entry.date, entry.meal, entry.name, entry.calories, entry.protein, entry.carbs, entry.fat
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(id: i64, name: &str, meal: MealCategory, date: &str) -> FoodItem {
        FoodItem {
            id,
            name: name.to_string(),
            calories: "100".to_string(),
            protein: "10g".to_string(),
            carbs: "5g".to_string(),
            fat: "2g".to_string(),
            meal,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_export_day_empty_log_enumerates_all_categories() {
        let csv = export_day(&[], "2024-01-01");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], EXPORT_HEADER);
        assert_eq!(lines[1], "2024-01-01,Breakfast,Not Entered,0,0g,0g,0g");
        assert_eq!(lines[2], "2024-01-01,Lunch,Not Entered,0,0g,0g,0g");
        assert_eq!(lines[3], "2024-01-01,Dinner,Not Entered,0,0g,0g,0g");
        assert_eq!(lines[4], "2024-01-01,Snack,Not Entered,0,0g,0g,0g");
    }

    #[test]
    fn test_export_day_placeholders_only_for_absent_categories() {
        let entries = vec![
            make_entry(1, "Egg", MealCategory::Breakfast, "2024-01-01"),
            make_entry(2, "Rice", MealCategory::Dinner, "2024-01-01"),
            make_entry(3, "Other Day", MealCategory::Lunch, "2024-01-02"),
        ];

        let csv = export_day(&entries, "2024-01-01");
        let lines: Vec<&str> = csv.lines().collect();

        // Header, two real rows, two placeholders.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "2024-01-01,Breakfast,Egg,100,10g,5g,2g");
        assert_eq!(lines[2], "2024-01-01,Dinner,Rice,100,10g,5g,2g");
        assert_eq!(lines[3], "2024-01-01,Lunch,Not Entered,0,0g,0g,0g");
        assert_eq!(lines[4], "2024-01-01,Snack,Not Entered,0,0g,0g,0g");
        assert!(!csv.contains("Other Day"));
    }

    #[test]
    fn test_export_full_log_groups_by_reverse_date() {
        let entries = vec![
            make_entry(1, "Old Egg", MealCategory::Breakfast, "2024-01-01"),
            make_entry(2, "New Rice", MealCategory::Dinner, "2024-01-03"),
            make_entry(3, "Old Toast", MealCategory::Breakfast, "2024-01-01"),
            make_entry(4, "Mid Soup", MealCategory::Lunch, "2024-01-02"),
        ];

        let csv = export_full_log(&entries);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], EXPORT_HEADER);
        // Most recent date first; insertion order within a date.
        assert!(lines[1].starts_with("2024-01-03,Dinner,New Rice"));
        assert!(lines[2].starts_with("2024-01-02,Lunch,Mid Soup"));
        assert!(lines[3].starts_with("2024-01-01,Breakfast,Old Egg"));
        assert!(lines[4].starts_with("2024-01-01,Breakfast,Old Toast"));
    }

    #[test]
    fn test_export_full_log_empty() {
        let csv = export_full_log(&[]);
        assert_eq!(csv, format!("{}\n", EXPORT_HEADER));
    }
}
