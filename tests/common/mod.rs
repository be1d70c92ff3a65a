// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

use async_trait::async_trait;
use macrolog::config::Config;
use macrolog::db::LocalStore;
use macrolog::error::AppError;
use macrolog::routes::create_router;
use macrolog::services::{ImageAttachment, NutritionEstimator};
use macrolog::AppState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Estimator returning a fixed reply with no network call.
#[allow(dead_code)]
pub struct CannedEstimator {
    pub reply: String,
}

#[async_trait]
impl NutritionEstimator for CannedEstimator {
    async fn estimate(
        &self,
        _description: &str,
        _image: Option<&ImageAttachment>,
    ) -> Result<String, AppError> {
        Ok(self.reply.clone())
    }
}

/// Estimator that always fails, for error-path tests.
#[allow(dead_code)]
pub struct FailingEstimator;

#[async_trait]
impl NutritionEstimator for FailingEstimator {
    async fn estimate(
        &self,
        _description: &str,
        _image: Option<&ImageAttachment>,
    ) -> Result<String, AppError> {
        Err(AppError::ModelApi("model unavailable".to_string()))
    }
}

/// Estimator that blocks until the gate is notified, for single-flight
/// tests.
#[allow(dead_code)]
pub struct GatedEstimator {
    pub gate: Arc<tokio::sync::Notify>,
    pub reply: String,
}

#[async_trait]
impl NutritionEstimator for GatedEstimator {
    async fn estimate(
        &self,
        _description: &str,
        _image: Option<&ImageAttachment>,
    ) -> Result<String, AppError> {
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

/// A fresh data directory under the system temp dir.
#[allow(dead_code)]
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!(
        "macrolog-test-{}-{}",
        std::process::id(),
        DIR_SEQ.fetch_add(1, Ordering::SeqCst)
    ))
}

/// Create a test app backed by the given estimator and a throwaway store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(estimator: Arc<dyn NutritionEstimator>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = LocalStore::open(temp_data_dir()).expect("Failed to open test store");

    let state = Arc::new(AppState {
        config,
        store,
        estimator,
        estimate_in_flight: AtomicBool::new(false),
    });

    (create_router(state.clone()), state)
}

/// Create a test app whose estimator returns `reply` verbatim.
#[allow(dead_code)]
pub fn create_test_app(reply: &str) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Arc::new(CannedEstimator {
        reply: reply.to_string(),
    }))
}
