// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! CSV export routes.
//!
//! The mobile app wrote the report to a user-chosen destination; here the
//! same content is served as a text/csv attachment.

use crate::error::{AppError, Result};
use crate::services::export::{export_day, export_full_log};
use crate::time_utils::{is_valid_date_stamp, today_stamp};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::header::{self, HeaderName},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/export", get(export_all))
        .route("/api/export/today", get(export_today))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    /// Date stamp to export; defaults to today
    date: Option<String>,
}

type CsvResponse = ([(HeaderName, String); 2], String);

fn csv_response(csv: String, filename: &str) -> CsvResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
}

/// Export the full log, grouped by date (most recent first).
async fn export_all(State(state): State<Arc<AppState>>) -> Result<CsvResponse> {
    let entries = state.store.entries();
    let csv = export_full_log(&entries);

    tracing::info!(entries = entries.len(), "Exported full food log");
    Ok(csv_response(csv, "food-log.csv"))
}

/// Export a single day, with placeholder rows for meal categories that
/// have no entry.
async fn export_today(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<CsvResponse> {
    let date = match query.date {
        Some(date) if is_valid_date_stamp(&date) => date,
        Some(_) => {
            return Err(AppError::BadRequest(
                "Date must be a YYYY-MM-DD date stamp".to_string(),
            ))
        }
        None => today_stamp(),
    };

    let csv = export_day(&state.store.entries(), &date);
    let filename = format!("food-log-{}.csv", date);

    Ok(csv_response(csv, &filename))
}
