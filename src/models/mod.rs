// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod preferences;
pub mod recommendation;
pub mod user;

pub use preferences::UserPreferences;
pub use recommendation::{RawActivities, RawRecommendation, Recommendation};
pub use user::UserRecord;
