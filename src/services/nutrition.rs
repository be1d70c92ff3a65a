// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Generative-model client for nutrition estimates.
//!
//! Sends the user's free-text meal description (plus an optional photo) to
//! the Gemini API and parses the delimited text reply into food entries.
//! The reply format is a loose textual contract requested via the prompt,
//! not a schema. Malformed lines are dropped, never fatal.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{food, FoodItem, MealCategory};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Minimum fields per reply line: name, calories, protein, carbs, fat.
const MIN_FIELDS_PER_LINE: usize = 5;

/// A single image attached to an estimate request. Discarded after the
/// request completes; at most one per outstanding request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// MIME type, e.g. "image/jpeg"
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Seam for the generative-model call, so tests can substitute a canned
/// reply for the network round trip.
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Ask the model for macro estimates of the described meal.
    ///
    /// Returns the raw reply text. Any failure (network, quota, decoding)
    /// maps to [`AppError::ModelApi`] and must leave the food log unchanged.
    async fn estimate(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, AppError>;
}

/// The fixed prompt template embedding the user's description.
fn build_prompt(description: &str) -> String {
    format!(
        "Estimate the nutritional content of this meal: {description}. \
         Respond with one line per food item, each line in exactly the format \
         Name,Calories,Protein,Carbs,Fat. Calories is a plain number; protein, \
         carbs and fat are gram amounts such as 10g. Output plain text only, \
         with no header line and no markdown."
    )
}

// ─── Gemini Wire Types ───────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ─── Client ──────────────────────────────────────────────────

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url: API_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(description: &str, image: Option<&ImageAttachment>) -> GeminiRequest {
        let mut parts = vec![ContentPart::Text {
            text: build_prompt(description),
        }];
        if let Some(image) = image {
            parts.push(ContentPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }
        GeminiRequest {
            contents: vec![GeminiContent { parts }],
        }
    }

    /// Concatenated text parts of the first candidate.
    fn extract_text(response: GeminiResponse) -> Result<String, AppError> {
        let text: String = response
            .candidates
            .into_iter()
            .flatten()
            .take(1)
            .filter_map(|c| c.content)
            .filter_map(|c| c.parts)
            .flatten()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(AppError::ModelApi("Model returned no content".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl NutritionEstimator for GeminiClient {
    async fn estimate(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, AppError> {
        let request = Self::build_request(description, image);

        tracing::debug!(model = %self.model, has_image = image.is_some(), "Requesting estimate");

        let response = self
            .http
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ModelApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ModelApi(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, "Gemini API error");
            return Err(AppError::ModelApi(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::ModelApi(format!("Failed to parse model response: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(AppError::ModelApi(error.message));
        }

        Self::extract_text(parsed)
    }
}

// ─── Reply Parsing ───────────────────────────────────────────

/// Parse the model's delimited reply into food entries.
///
/// Each line with at least five comma-separated fields becomes one entry
/// carrying a fresh id and the given meal and date; fields beyond the
/// fifth are ignored. Anything else is dropped silently. No numeric
/// validation happens here; raw text is kept and parsed at aggregation
/// time.
pub fn parse_estimate(text: &str, meal: MealCategory, date: &str) -> Vec<FoodItem> {
    let mut items = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < MIN_FIELDS_PER_LINE {
            tracing::debug!(line, "Dropping malformed estimate line");
            continue;
        }
        items.push(FoodItem {
            id: food::next_entry_id(),
            name: fields[0].trim().to_string(),
            calories: fields[1].trim().to_string(),
            protein: fields[2].trim().to_string(),
            carbs: fields[3].trim().to_string(),
            fat: fields[4].trim().to_string(),
            meal,
            date: date.to_string(),
        });
    }
    items
}
