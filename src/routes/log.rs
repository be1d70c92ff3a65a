// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Food log routes: add (via the model call), list, delete, daily summary.

use crate::error::{AppError, Result};
use crate::models::{DailySummary, FoodItem, MealCategory};
use crate::services::nutrition::{parse_estimate, ImageAttachment};
use crate::time_utils::{is_valid_date_stamp, today_stamp};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/log", post(add_food).get(list_log))
        .route("/api/log/{id}", delete(delete_entry))
        .route("/api/summary", get(get_summary))
}

/// Request to log food from a free-text description.
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    /// Free-text description of what was eaten
    pub description: String,
    /// Meal bucket for the created entries
    pub meal: MealCategory,
    /// Date stamp ("YYYY-MM-DD"); defaults to today
    pub date: Option<String>,
    /// Optional base64-encoded photo of the meal
    pub image_base64: Option<String>,
    /// MIME type of the photo; defaults to image/jpeg
    pub image_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LogQuery {
    /// Filter entries to one date stamp
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    /// Date stamp to summarize; defaults to today
    date: Option<String>,
}

/// Response for entry deletion. `removed` is false when the id was
/// already gone; the delete is a no-op then, not an error.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteEntryResponse {
    pub success: bool,
    pub removed: bool,
}

/// Resolve an optional date-stamp parameter, defaulting to today.
fn resolve_date(date: Option<String>) -> Result<String> {
    match date {
        Some(date) if is_valid_date_stamp(&date) => Ok(date),
        Some(_) => Err(AppError::BadRequest(
            "Date must be a YYYY-MM-DD date stamp".to_string(),
        )),
        None => Ok(today_stamp()),
    }
}

/// Add food entries from a free-text description.
///
/// Sends the description (and optional photo) to the model, parses the
/// reply into entries and persists them. At most one model request may be
/// outstanding; a second request is rejected with 409 rather than queued.
/// On any model failure the log is left unchanged.
async fn add_food(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFoodRequest>,
) -> Result<(StatusCode, Json<Vec<FoodItem>>)> {
    let description = request.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::BadRequest(
            "Food description must not be blank".to_string(),
        ));
    }
    let date = resolve_date(request.date)?;

    let image = match request.image_base64 {
        Some(data) => {
            if BASE64.decode(&data).is_err() {
                return Err(AppError::BadRequest(
                    "image_base64 is not valid base64".to_string(),
                ));
            }
            Some(ImageAttachment {
                mime_type: request
                    .image_mime_type
                    .unwrap_or_else(|| "image/jpeg".to_string()),
                data,
            })
        }
        None => None,
    };

    // Single-flight guard: Idle -> Requesting, or reject.
    if state
        .estimate_in_flight
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(AppError::EstimateInFlight);
    }

    let outcome = estimate_and_log(&state, &description, image.as_ref(), request.meal, &date).await;

    // Always release the guard, whatever the outcome.
    state.estimate_in_flight.store(false, Ordering::SeqCst);

    let items = outcome?;
    Ok((StatusCode::CREATED, Json(items)))
}

async fn estimate_and_log(
    state: &AppState,
    description: &str,
    image: Option<&ImageAttachment>,
    meal: MealCategory,
    date: &str,
) -> Result<Vec<FoodItem>> {
    let reply = state.estimator.estimate(description, image).await?;

    let items = parse_estimate(&reply, meal, date);
    if items.is_empty() {
        tracing::warn!("Model reply contained no parseable lines");
        return Ok(Vec::new());
    }

    // Entries are appended only after the whole reply parsed, so a failed
    // request never partially applies.
    state.store.append_entries(&items)?;
    tracing::info!(count = items.len(), meal = %meal, date, "Logged food entries");

    Ok(items)
}

/// List food entries, optionally filtered to one date (the history view).
async fn list_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<FoodItem>>> {
    let entries = state.store.entries();

    let entries = match query.date {
        Some(date) => {
            if !is_valid_date_stamp(&date) {
                return Err(AppError::BadRequest(
                    "Date must be a YYYY-MM-DD date stamp".to_string(),
                ));
            }
            entries.into_iter().filter(|e| e.date == date).collect()
        }
        None => entries,
    };

    Ok(Json(entries))
}

/// Delete one entry by id. Idempotent.
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteEntryResponse>> {
    let removed = state.store.remove_entry(id)?;
    if !removed {
        tracing::debug!(id, "Delete of unknown entry id is a no-op");
    }

    Ok(Json(DeleteEntryResponse {
        success: true,
        removed,
    }))
}

/// Daily totals against the profile's calorie target. Recomputed from the
/// log on every call.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<DailySummary>> {
    let profile = state
        .store
        .profile()
        .ok_or_else(|| AppError::NotFound("Profile not set".to_string()))?;
    let date = resolve_date(query.date)?;

    let summary = DailySummary::compute(&state.store.entries(), &date, profile.daily_target_kcal);
    Ok(Json(summary))
}
