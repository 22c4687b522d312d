// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cache;
pub mod gemini;
pub mod generator;
pub mod images;
pub mod normalize;
pub mod serper;
pub mod upstream;

pub use cache::RecommendationCache;
pub use gemini::{GeminiClient, TextGenerator};
pub use generator::RecommendationGenerator;
pub use images::ImageEnricher;
pub use serper::{ImageResult, ImageSearch, SerperClient};
pub use upstream::UpstreamError;
