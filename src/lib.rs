// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Travel Recommender: AI destination suggestions from a travel quiz
//!
//! This crate provides the backend API that turns quiz answers into
//! destination recommendations, enriches them with images and caches
//! them per user for 24 hours.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::RecommendationGenerator;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub generator: RecommendationGenerator,
}
