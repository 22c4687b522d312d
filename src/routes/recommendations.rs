// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation endpoints.

use crate::error::{AppError, Result};
use crate::models::{Recommendation, UserPreferences};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(create_recommendations))
        .route("/user-recommendations/{user_id}", get(get_user_recommendations))
        .route(
            "/refresh-recommendations/{user_id}",
            post(refresh_recommendations),
        )
}

/// Travel quiz submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub preferences: UserPreferences,
}

/// Generate recommendations for a quiz submission (or serve the cached ones).
async fn create_recommendations(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<Vec<Recommendation>>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(user_id = ?request.user_id, "Received travel quiz submission");

    let recommendations = state
        .generator
        .recommend(request.user_id.as_deref(), &request.preferences)
        .await?;

    Ok(Json(recommendations))
}

/// Stored recommendations, if still fresh.
async fn get_user_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Recommendation>>> {
    Ok(Json(state.generator.cached(&user_id).await?))
}

/// Regenerate from the preferences stored with the last generation.
async fn refresh_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Recommendation>>> {
    Ok(Json(state.generator.refresh(&user_id).await?))
}
