// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Destination image lookup.
//!
//! Every destination gets at least one image: when search fails or finds
//! nothing usable, a placeholder URL is returned instead.

use crate::services::serper::{ImageResult, ImageSearch};
use std::sync::Arc;

/// Shown when no usable image was found.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=No+Image+Available";

/// Images attached to each recommendation.
pub const DEFAULT_IMAGE_COUNT: usize = 4;

const QUERY_KEYWORDS: &str = "tourist attractions landmarks scenic high resolution";
const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];
/// Animated and vector formats don't render well in result cards.
const EXCLUDED_EXTENSIONS: [&str; 2] = [".gif", ".svg"];

/// True if `url` is an http(s) link to a displayable raster image.
pub fn is_valid_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ALLOWED_SCHEMES.iter().any(|s| lower.starts_with(s))
        && !EXCLUDED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Keep the first `count` valid URLs, in search order.
pub fn select_images(results: &[ImageResult], count: usize) -> Vec<String> {
    results
        .iter()
        .map(|r| r.image_url.as_str())
        .filter(|url| is_valid_image_url(url))
        .take(count)
        .map(String::from)
        .collect()
}

/// Search query for a destination.
pub fn image_query(destination: &str) -> String {
    format!("{} {}", destination, QUERY_KEYWORDS)
}

/// Looks up images for destinations.
#[derive(Clone)]
pub struct ImageEnricher {
    search: Arc<dyn ImageSearch>,
}

impl ImageEnricher {
    pub fn new(search: Arc<dyn ImageSearch>) -> Self {
        Self { search }
    }

    /// Up to `count` image URLs for `destination`; never empty.
    pub async fn images_for(&self, destination: &str, count: usize) -> Vec<String> {
        let query = image_query(destination);

        let results = match self.search.search_images(&query, count * 2).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(destination, error = %e, "Image search failed");
                return vec![PLACEHOLDER_IMAGE.to_string()];
            }
        };

        let images = select_images(&results, count);
        if images.is_empty() {
            tracing::warn!(
                destination,
                results = results.len(),
                "No usable images found"
            );
            return vec![PLACEHOLDER_IMAGE.to_string()];
        }

        tracing::debug!(destination, count = images.len(), "Images selected");
        images
    }
}
