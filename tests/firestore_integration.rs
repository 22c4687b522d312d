// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it. They are skipped otherwise.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use travel_recommender::db::{collections, UserStore};
use travel_recommender::models::{UserPreferences, UserRecord};
use travel_recommender::services::normalize::error_placeholder;
use travel_recommender::time_utils::parse_utc_rfc3339;

mod common;
use common::{emulator_client, test_db};

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-user-{}", nanos)
}

fn sample_record() -> UserRecord {
    UserRecord {
        recommendations: vec![error_placeholder()],
        preferences: Some(UserPreferences {
            travel_style: "Relaxation".to_string(),
            vibes: vec!["Beach".to_string()],
            ..Default::default()
        }),
        last_updated: Some("2026-06-01T12:00:00Z".to_string()),
    }
}

#[tokio::test]
async fn test_missing_user_reads_as_none() {
    require_emulator!();

    let db = test_db().await;
    let record = db.get_user_record(&unique_user_id()).await.unwrap();
    assert!(record.is_none());
}

/// Assert `stamp` is a server-assigned time close to now.
fn assert_server_stamped(stamp: Option<&str>) {
    let stamp = stamp.expect("lastUpdated should be set");
    let written = parse_utc_rfc3339(stamp).expect("lastUpdated should be RFC3339");
    let skew = (Utc::now() - written).num_seconds().abs();
    assert!(skew < 300, "lastUpdated {} is not the write time", stamp);
}

#[tokio::test]
async fn test_merge_then_read() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let record = sample_record();

    db.merge_user_record(&user_id, &record).await.unwrap();

    let stored = db.get_user_record(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.recommendations, record.recommendations);
    assert_eq!(stored.preferences, record.preferences);
    assert_server_stamped(stored.last_updated.as_deref());
}

#[tokio::test]
async fn test_second_merge_replaces_recommendation_fields() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    db.merge_user_record(&user_id, &sample_record()).await.unwrap();

    let newer = UserRecord {
        recommendations: vec![],
        preferences: Some(UserPreferences {
            travel_style: "Adventure".to_string(),
            ..Default::default()
        }),
        last_updated: None,
    };
    db.merge_user_record(&user_id, &newer).await.unwrap();

    let stored = db.get_user_record(&user_id).await.unwrap().unwrap();
    assert!(stored.recommendations.is_empty());
    assert_eq!(stored.preferences.unwrap().travel_style, "Adventure");
    assert_server_stamped(stored.last_updated.as_deref());
}

/// Profile fields written to the user document by another service.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Profile {
    display_name: String,
    home_airport: String,
}

#[tokio::test]
async fn test_merge_keeps_unrelated_fields() {
    require_emulator!();

    let db = test_db().await;
    let client = emulator_client().await;
    let user_id = unique_user_id();
    let profile = Profile {
        display_name: "Ada".to_string(),
        home_airport: "SFO".to_string(),
    };

    let _: Profile = client
        .fluent()
        .insert()
        .into(collections::USERS)
        .document_id(&user_id)
        .object(&profile)
        .execute()
        .await
        .unwrap();

    db.merge_user_record(&user_id, &sample_record()).await.unwrap();

    let kept: Option<Profile> = client
        .fluent()
        .select()
        .by_id_in(collections::USERS)
        .obj()
        .one(&user_id)
        .await
        .unwrap();
    assert_eq!(kept, Some(profile));

    let stored = db.get_user_record(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.recommendations, vec![error_placeholder()]);
    assert_server_stamped(stored.last_updated.as_deref());
}
