//! Per-user document stored in Firestore.

use crate::models::{Recommendation, UserPreferences};
use serde::{Deserialize, Serialize};

/// User document, keyed by the client-supplied user id.
///
/// Stored at: `users/{user_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Most recently generated recommendations
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Preferences that produced `recommendations`
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    /// When `recommendations` was last written (RFC3339).
    ///
    /// Firestore stamps this with its own request time; stored timestamps are
    /// read back as RFC3339 strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl UserRecord {
    /// Firestore field paths written from the record body by a merge.
    pub const CONTENT_FIELDS: [&'static str; 2] = ["recommendations", "preferences"];

    /// Field path of the write timestamp, set by a server-side transform.
    pub const LAST_UPDATED_FIELD: &'static str = "lastUpdated";
}
