// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serper image search client.

use crate::services::upstream::{check_response_json, UpstreamError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for a single image search.
pub const IMAGE_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Image search backend.
#[async_trait::async_trait]
pub trait ImageSearch: Send + Sync {
    /// Search for up to `num` images matching `query`.
    async fn search_images(&self, query: &str, num: usize)
        -> Result<Vec<ImageResult>, UpstreamError>;
}

/// One image hit. Serper returns many more fields; only the URL is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    #[serde(default)]
    pub image_url: String,
}

#[derive(Serialize)]
struct ImageSearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct ImageSearchResponse {
    #[serde(default)]
    images: Vec<ImageResult>,
}

/// Serper (Google image search) API client.
#[derive(Clone)]
pub struct SerperClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: "https://google.serper.dev/images".to_string(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl ImageSearch for SerperClient {
    async fn search_images(
        &self,
        query: &str,
        num: usize,
    ) -> Result<Vec<ImageResult>, UpstreamError> {
        let response = self
            .http
            .post(&self.url)
            .header("X-API-KEY", &self.api_key)
            .timeout(IMAGE_SEARCH_TIMEOUT)
            .json(&ImageSearchRequest { q: query, num })
            .send()
            .await?;

        let parsed: ImageSearchResponse = check_response_json(response).await?;
        Ok(parsed.images)
    }
}
