// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory holding the persisted profile and food-log records
    pub data_dir: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Gemini API key for nutrition estimates
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("MACROLOG_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        })
    }

    /// Default config for tests. Never used in production paths.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            data_dir: "data".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gemini_api_key: "test_api_key".to_string(),
            gemini_model: "gemini-test".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
