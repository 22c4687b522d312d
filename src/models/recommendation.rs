// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Destination recommendation models.

use serde::{Deserialize, Serialize};

/// A destination as returned by the model. Untrusted; any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    pub destination: Option<String>,
    pub description: Option<String>,
    pub activities: Option<RawActivities>,
    pub budget: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub travel_tip: Option<String>,
}

/// The model sometimes returns activities as one comma separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawActivities {
    Text(String),
    List(Vec<String>),
}

/// Normalized recommendation, as returned to clients and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable id derived from the destination name
    pub id: String,
    pub name: String,
    pub description: String,
    /// Always at least three entries
    pub activities: Vec<String>,
    pub budget: String,
    pub best_time_to_visit: String,
    pub travel_tip: String,
    /// One to four image URLs
    pub images: Vec<String>,
    pub booking_url: String,
}
