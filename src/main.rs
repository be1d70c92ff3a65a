// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Macrolog API Server
//!
//! Logs meals from free-text descriptions (optionally with a photo) by
//! asking a generative model for macro estimates, and tracks daily totals
//! against the user's calorie target.

use macrolog::{config::Config, db::LocalStore, services::GeminiClient, AppState};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Macrolog API");

    // Open the local store
    let store = LocalStore::open(&config.data_dir).expect("Failed to open local store");

    // Initialize the model client
    let estimator = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));
    tracing::info!(model = %config.gemini_model, "Model client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        estimator,
        estimate_in_flight: AtomicBool::new(false),
    });

    // Build router
    let app = macrolog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("macrolog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
