// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user recommendation cache backed by the user document.
//!
//! An entry is fresh while `now - lastUpdated < 24h`. Reads fail open toward
//! regeneration: anything unreadable, stale or malformed is a miss.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::{Recommendation, UserPreferences, UserRecord};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339, Clock};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// How long stored recommendations are served before regenerating.
pub const CACHE_TTL_HOURS: i64 = 24;

/// True if an entry written at `last_updated` is still servable at `now`.
pub fn is_fresh(last_updated: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_updated < Duration::hours(CACHE_TTL_HOURS)
}

#[derive(Clone)]
pub struct RecommendationCache {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl RecommendationCache {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Fresh recommendations for the user, or `None` on any kind of miss.
    pub async fn get(&self, user_id: &str) -> Option<Vec<Recommendation>> {
        let record = match self.store.get_user_record(user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(user_id, "Cache miss: no user document");
                return None;
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        let Some(last_updated) = record.last_updated.as_deref().and_then(parse_utc_rfc3339) else {
            tracing::debug!(user_id, "Cache miss: missing or invalid lastUpdated");
            return None;
        };

        if !is_fresh(last_updated, self.clock.now()) {
            tracing::debug!(user_id, last_updated = %last_updated, "Cache miss: expired");
            return None;
        }

        if record.recommendations.is_empty() {
            tracing::debug!(user_id, "Cache miss: no stored recommendations");
            return None;
        }

        tracing::debug!(user_id, count = record.recommendations.len(), "Cache hit");
        Some(record.recommendations)
    }

    /// Merge-write recommendations and the preferences that produced them.
    ///
    /// Returns `false` if the write failed; the failure is logged, not raised.
    pub async fn put(
        &self,
        user_id: &str,
        recommendations: &[Recommendation],
        preferences: &UserPreferences,
    ) -> bool {
        let record = UserRecord {
            recommendations: recommendations.to_vec(),
            preferences: Some(preferences.clone()),
            last_updated: Some(format_utc_rfc3339(self.clock.now())),
        };

        match self.store.merge_user_record(user_id, &record).await {
            Ok(()) => {
                tracing::info!(user_id, count = recommendations.len(), "Recommendations stored");
                true
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to store recommendations");
                false
            }
        }
    }

    /// Preferences used for the user's last generation, if any were stored.
    pub async fn stored_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<UserPreferences>, AppError> {
        Ok(self
            .store
            .get_user_record(user_id)
            .await?
            .and_then(|record| record.preferences))
    }
}
