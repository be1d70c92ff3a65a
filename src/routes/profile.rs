// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Onboarding routes: the single user profile.
//!
//! Profile presence drives the app state machine: no profile means the
//! client shows onboarding, a profile means tracking. Clearing the profile
//! re-enters onboarding; the food log survives.

use crate::error::{AppError, Result};
use crate::models::{ActivityLevel, UserProfile};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/profile",
        get(get_profile).put(put_profile).delete(clear_profile),
    )
}

/// Onboarding request: a manual calorie target, or body metrics the
/// target is computed from. Numeric fields arrive as the raw entered
/// strings; an unparseable field means the action does not proceed.
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProfileRequest {
    Manual {
        target_kcal: String,
    },
    Computed {
        weight_kg: String,
        height_cm: String,
        age: String,
        male: bool,
        activity_level: ActivityLevel,
    },
}

/// Response for profile clearing.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClearProfileResponse {
    pub success: bool,
    pub message: String,
}

/// Get the current profile. 404 while onboarding has not completed.
async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<UserProfile>> {
    state
        .store
        .profile()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not set".to_string()))
}

/// Create or replace the profile wholesale.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    let profile = match request {
        ProfileRequest::Manual { target_kcal } => UserProfile::manual(&target_kcal),
        ProfileRequest::Computed {
            weight_kg,
            height_cm,
            age,
            male,
            activity_level,
        } => UserProfile::computed(&weight_kg, &height_cm, &age, male, activity_level),
    }
    .ok_or_else(|| AppError::BadRequest("Profile fields must be numeric".to_string()))?;

    state.store.set_profile(profile.clone())?;
    tracing::info!(target_kcal = profile.daily_target_kcal, "Profile saved");

    Ok(Json(profile))
}

/// Clear the profile, sending the client back to onboarding.
async fn clear_profile(State(state): State<Arc<AppState>>) -> Result<Json<ClearProfileResponse>> {
    state.store.clear_profile()?;
    tracing::info!("Profile cleared");

    Ok(Json(ClearProfileResponse {
        success: true,
        message: "Profile cleared. Onboarding required.".to_string(),
    }))
}
