// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Macrolog: calorie and macro tracking with generative-model estimates
//!
//! This crate provides the backend API for logging meals from free-text
//! descriptions: a generative model estimates the macros, daily totals are
//! aggregated against the user's calorie target, and the log exports as
//! CSV. Persistence is two human-inspectable JSON records on local disk.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use config::Config;
use db::LocalStore;
use services::NutritionEstimator;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LocalStore,
    pub estimator: Arc<dyn NutritionEstimator>,
    /// Single-flight guard for the model call: Idle (false) or
    /// Requesting (true). New add-food requests are rejected while set.
    pub estimate_in_flight: AtomicBool,
}
