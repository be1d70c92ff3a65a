// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Shared helpers for date-stamp and timestamp formatting.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Format of the per-entry date stamp ("YYYY-MM-DD").
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

/// Date stamp for the current day in local time.
pub fn today_stamp() -> String {
    Local::now().format(DATE_STAMP_FORMAT).to_string()
}

/// Check that a string is a well-formed "YYYY-MM-DD" date stamp.
pub fn is_valid_date_stamp(stamp: &str) -> bool {
    NaiveDate::parse_from_str(stamp, DATE_STAMP_FORMAT).is_ok()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
