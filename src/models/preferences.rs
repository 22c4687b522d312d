// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Travel quiz answers.

use serde::{Deserialize, Serialize};

/// Preferences captured by the travel quiz.
///
/// Every field is free-form and defaults to empty when the client omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub travel_style: String,
    pub group_type: String,
    pub duration: String,
    pub vibes: Vec<String>,
    pub budget: String,
    pub must_haves: Vec<String>,
}
