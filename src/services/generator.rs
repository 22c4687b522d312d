// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation generation workflow.
//!
//! Handles:
//! 1. Cache lookup (fresh results short-circuit everything else)
//! 2. Prompt assembly from quiz preferences
//! 3. Text generation and response normalization
//! 4. Image enrichment (sequential, one search per destination)
//! 5. Best-effort persistence

use crate::error::{AppError, Result};
use crate::models::{Recommendation, UserPreferences};
use crate::services::cache::RecommendationCache;
use crate::services::gemini::TextGenerator;
use crate::services::images::{ImageEnricher, DEFAULT_IMAGE_COUNT, PLACEHOLDER_IMAGE};
use crate::services::normalize::{self, MAX_RECOMMENDATIONS};
use std::sync::Arc;

/// Orchestrates cache, generation, normalization and enrichment.
#[derive(Clone)]
pub struct RecommendationGenerator {
    text: Arc<dyn TextGenerator>,
    images: ImageEnricher,
    cache: RecommendationCache,
}

impl RecommendationGenerator {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: ImageEnricher,
        cache: RecommendationCache,
    ) -> Self {
        Self {
            text,
            images,
            cache,
        }
    }

    /// Cached recommendations if fresh, otherwise newly generated ones.
    pub async fn recommend(
        &self,
        user_id: Option<&str>,
        preferences: &UserPreferences,
    ) -> Result<Vec<Recommendation>> {
        // Ids are opaque keys; only blank ones are rejected.
        let user_id = user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;

        if let Some(cached) = self.cache.get(user_id).await {
            tracing::info!(user_id, count = cached.len(), "Serving cached recommendations");
            return Ok(cached);
        }

        self.generate(user_id, preferences).await
    }

    /// Fresh cached recommendations only.
    pub async fn cached(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        self.cache.get(user_id).await.ok_or_else(|| {
            AppError::NotFound(format!("No recommendations found for user {}", user_id))
        })
    }

    /// Regenerate from the user's stored preferences, ignoring the cache.
    pub async fn refresh(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        let preferences = self
            .cache
            .stored_preferences(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User preferences not found".to_string()))?;

        tracing::info!(user_id, "Forced refresh of recommendations");
        self.generate(user_id, &preferences).await
    }

    /// Generate, enrich, persist and return recommendations.
    async fn generate(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<Vec<Recommendation>> {
        let prompt = build_prompt(preferences);

        let response = self
            .text
            .generate(&prompt)
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::Error::new(e).context("text generation request failed"))
            })?;

        if response.trim().is_empty() {
            return Err(AppError::Generation("model returned no text".to_string()));
        }

        let cleaned = normalize::clean_ai_response(&response);
        tracing::debug!(user_id, raw = %response, "Raw AI response");
        tracing::debug!(user_id, cleaned = %cleaned, "Cleaned AI response");

        let records = normalize::parse_recommendations(&cleaned).map_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to parse AI response");
            AppError::Format(e.to_string())
        })?;

        let mut recommendations = Vec::with_capacity(records.len().min(MAX_RECOMMENDATIONS));
        for record in records.into_iter().take(MAX_RECOMMENDATIONS) {
            recommendations.push(self.build_recommendation(record).await);
        }

        tracing::info!(user_id, count = recommendations.len(), "Generated recommendations");

        if !self.cache.put(user_id, &recommendations, preferences).await {
            tracing::warn!(user_id, "Returning recommendations that were not persisted");
        }

        Ok(recommendations)
    }

    /// Enrich and format one parsed record; bad records become the error placeholder.
    async fn build_recommendation(&self, record: serde_json::Value) -> Recommendation {
        let raw = match normalize::decode_record(record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Replacing malformed recommendation");
                return normalize::error_placeholder();
            }
        };

        let images = match normalize::destination_name(&raw) {
            Some(name) => self.images.images_for(name, DEFAULT_IMAGE_COUNT).await,
            None => vec![PLACEHOLDER_IMAGE.to_string()],
        };

        normalize::format_recommendation(raw, images)
    }
}

/// Prompt asking for three destinations as a JSON array.
///
/// Empty preferences still render their line so the layout is fixed.
pub fn build_prompt(preferences: &UserPreferences) -> String {
    format!(
        r#"Generate 3 unique travel destination recommendations based on these preferences:
- Travel Style: {travel_style}
- Group Type: {group_type}
- Duration: {duration}
- Desired Vibes: {vibes}
- Budget Level: {budget}
- Must-Have Features: {must_haves}

For each destination, provide:
1. destination
2. description (2-3 sentences about why it's perfect for them)
3. activities (3 must-do activities that match their preferences)
4. budget (estimated daily cost range)
5. bestTimeToVisit (best season or months)
6. travelTip (one key tip based on their preferences)

Format as a valid JSON array. Example:
[
    {{
        "destination": "Bali, Indonesia",
        "description": "Bali is perfect for...",
        "activities": ["Visit Ubud Monkey Forest", "Relax on Seminyak Beach", "Explore Uluwatu Temple"],
        "budget": "$50-$100 per day",
        "bestTimeToVisit": "April to October",
        "travelTip": "Rent a scooter for easy transportation."
    }},
    {{
        "destination": "Kyoto, Japan",
        "description": "Kyoto offers...",
        "activities": ["Visit Fushimi Inari Shrine", "Explore Arashiyama Bamboo Grove", "Experience a tea ceremony"],
        "budget": "$100-$200 per day",
        "bestTimeToVisit": "March to May",
        "travelTip": "Book accommodations early during cherry blossom season."
    }}
]"#,
        travel_style = preferences.travel_style,
        group_type = preferences.group_type,
        duration = preferences.duration,
        vibes = preferences.vibes.join(", "),
        budget = preferences.budget,
        must_haves = preferences.must_haves.join(", "),
    )
}
