// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Services module - business logic layer.

pub mod export;
pub mod nutrition;

pub use nutrition::{GeminiClient, ImageAttachment, NutritionEstimator};
