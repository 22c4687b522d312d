// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turns raw model output into [`Recommendation`]s.
//!
//! Three steps:
//! 1. [`clean_ai_response`] strips markdown code fences
//! 2. [`parse_recommendations`] decodes the JSON (a lone object counts as one record)
//! 3. [`format_recommendation`] fills defaults and derives ids and links
//!
//! Records that can't be decoded are replaced by [`error_placeholder`] so a
//! batch always yields one valid entry per input record.

use crate::models::{RawActivities, RawRecommendation, Recommendation};
use crate::services::images::DEFAULT_IMAGE_COUNT;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// At most this many recommendations are returned per request.
pub const MAX_RECOMMENDATIONS: usize = 3;
/// Every recommendation lists at least this many activities.
pub const MIN_ACTIVITIES: usize = 3;

pub const DEFAULT_NAME: &str = "Unknown Destination";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const FILLER_ACTIVITY: &str = "Explore local attractions";
pub const DEFAULT_BUDGET: &str = "$100-$200 per day";
pub const DEFAULT_BEST_TIME: &str = "Year-round";
pub const DEFAULT_TRAVEL_TIP: &str = "Plan ahead.";

const BOOKING_BASE_URL: &str = "https://booking.com";
const ERROR_IMAGE: &str = "https://via.placeholder.com/400x250?text=Error";
const FENCE: &str = "```";

/// Errors from decoding model output.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("record is not a destination object: {0}")]
    InvalidRecord(String),
}

/// Remove markdown code fences (optionally language-tagged) and surrounding whitespace.
///
/// Text outside fences is kept. An unterminated fence is left as-is.
pub fn clean_ai_response(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let body = &rest[open + FENCE.len()..];
        let Some(close) = body.find(FENCE) else {
            break;
        };

        cleaned.push_str(&rest[..open]);
        let inner = &body[..close];
        // Drop a language tag such as `json`; payloads start with `[` or `{`.
        let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        cleaned.push_str(inner.trim());

        rest = &body[close + FENCE.len()..];
    }

    cleaned.push_str(rest);
    cleaned.trim().to_string()
}

/// Decode cleaned model output into a list of records.
///
/// An array yields its elements; any other JSON value is a single record.
pub fn parse_recommendations(cleaned: &str) -> Result<Vec<Value>, NormalizeError> {
    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| NormalizeError::InvalidJson(e.to_string()))?;

    Ok(match value {
        Value::Array(records) => records,
        single => vec![single],
    })
}

/// Decode one record. Fails when the value isn't an object or fields have the wrong type.
pub fn decode_record(value: Value) -> Result<RawRecommendation, NormalizeError> {
    if !value.is_object() {
        return Err(NormalizeError::InvalidRecord(format!(
            "expected object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| NormalizeError::InvalidRecord(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Destination name as given by the model, trimmed; `None` if missing or blank.
pub fn destination_name(raw: &RawRecommendation) -> Option<&str> {
    raw.destination
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Build a normalized recommendation, filling every missing field.
pub fn format_recommendation(raw: RawRecommendation, images: Vec<String>) -> Recommendation {
    let name = destination_name(&raw).unwrap_or(DEFAULT_NAME).to_string();

    let mut images: Vec<String> = images.into_iter().take(DEFAULT_IMAGE_COUNT).collect();
    if images.is_empty() {
        images.push(crate::services::images::PLACEHOLDER_IMAGE.to_string());
    }

    Recommendation {
        id: recommendation_id(&name),
        booking_url: booking_url(&name),
        description: text_or(raw.description, DEFAULT_DESCRIPTION),
        activities: normalize_activities(raw.activities),
        budget: text_or(raw.budget, DEFAULT_BUDGET),
        best_time_to_visit: text_or(raw.best_time_to_visit, DEFAULT_BEST_TIME),
        travel_tip: text_or(raw.travel_tip, DEFAULT_TRAVEL_TIP),
        images,
        name,
    }
}

/// Stand-in for a record that could not be processed.
pub fn error_placeholder() -> Recommendation {
    Recommendation {
        id: "error".to_string(),
        name: "Error Processing Destination".to_string(),
        description: "An error occurred while processing this destination.".to_string(),
        activities: vec![
            FILLER_ACTIVITY.to_string(),
            "Visit cultural sites".to_string(),
            "Experience local cuisine".to_string(),
        ],
        budget: DEFAULT_BUDGET.to_string(),
        best_time_to_visit: DEFAULT_BEST_TIME.to_string(),
        travel_tip: "Book accommodations in advance".to_string(),
        images: vec![ERROR_IMAGE.to_string()],
        booking_url: BOOKING_BASE_URL.to_string(),
    }
}

/// Stable id: first 8 bytes of SHA-256 of the name, as a decimal u64.
pub fn recommendation_id(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix).to_string()
}

/// Booking link: lowercased name with spaces replaced by dashes.
pub fn booking_url(name: &str) -> String {
    format!(
        "{}/destination/{}",
        BOOKING_BASE_URL,
        name.to_lowercase().replace(' ', "-")
    )
}

fn text_or(field: Option<String>, default: &str) -> String {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// A comma separated string is split and capped; a list is kept whole.
/// Either way the result is padded with filler up to [`MIN_ACTIVITIES`].
fn normalize_activities(raw: Option<RawActivities>) -> Vec<String> {
    let mut activities: Vec<String> = match raw {
        Some(RawActivities::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .take(MIN_ACTIVITIES)
            .map(String::from)
            .collect(),
        Some(RawActivities::List(list)) => list.iter().map(|a| a.trim().to_string()).collect(),
        None => Vec::new(),
    };

    while activities.len() < MIN_ACTIVITIES {
        activities.push(FILLER_ACTIVITY.to_string());
    }
    activities
}
