// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel Recommender API Server
//!
//! Turns travel quiz answers into AI-generated destination recommendations.

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_recommender::{
    config::Config,
    db::FirestoreDb,
    services::{
        GeminiClient, ImageEnricher, RecommendationCache, RecommendationGenerator, SerperClient,
    },
    time_utils::SystemClock,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Travel Recommender API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let gemini = GeminiClient::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.generation_timeout_secs),
    )?;
    tracing::info!(model = %config.gemini_model, "Gemini client initialized");

    let serper = SerperClient::new(config.serper_api_key.clone());

    let cache = RecommendationCache::new(Arc::new(db), Arc::new(SystemClock));
    let generator = RecommendationGenerator::new(
        Arc::new(gemini),
        ImageEnricher::new(Arc::new(serper)),
        cache,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        generator,
    });

    // Build router
    let app = travel_recommender::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("travel_recommender=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
