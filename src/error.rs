// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Recommendation generation failed: {0}")]
    Generation(String),

    #[error("Unparseable AI response: {0}")]
    Format(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const GENERATION_FAILED: &'static str = "Failed to generate recommendations.";
    pub const INVALID_AI_FORMAT: &'static str = "Invalid response format from AI";
    pub const INTERNAL: &'static str = "An internal error occurred";
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Generation(msg) => {
                tracing::error!(error = %msg, "Generation error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::GENERATION_FAILED.to_string(),
                )
            }
            AppError::Format(msg) => {
                tracing::error!(error = %msg, "AI response format error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::INVALID_AI_FORMAT.to_string(),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, Self::INTERNAL.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %format!("{:#}", err), "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Self::INTERNAL.to_string())
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
