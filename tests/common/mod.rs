// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use travel_recommender::config::Config;
use travel_recommender::db::{FirestoreDb, MemoryStore, UserStore};
use travel_recommender::routes::create_router;
use travel_recommender::services::{
    ImageEnricher, ImageResult, ImageSearch, RecommendationCache, RecommendationGenerator,
    TextGenerator, UpstreamError,
};
use travel_recommender::time_utils::FixedClock;
use travel_recommender::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Raw Firestore handle on the emulator, for writing documents the app doesn't own.
#[allow(dead_code)]
pub async fn emulator_client() -> firestore::FirestoreDb {
    let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
        Ok(gcloud_sdk::Token {
            token_type: "Bearer".to_string(),
            token: gcloud_sdk::SecretValue::new(
                "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                    .to_string()
                    .into(),
            ),
            expiry: chrono::Utc::now() + chrono::Duration::hours(1),
        })
    });

    firestore::FirestoreDb::with_options_token_source(
        firestore::FirestoreDbOptions::new("test-project".to_string()),
        gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
        gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
    )
    .await
    .expect("Failed to connect to Firestore emulator")
}

/// The instant every test app believes it is.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// Text generator returning a canned response and recording prompts.
pub struct FakeTextGenerator {
    /// `None` simulates a transport failure.
    response: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeTextGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().ok_or(UpstreamError::Timeout)
    }
}

/// Image search returning one gif and two jpgs per query, or failing.
pub struct FakeImageSearch {
    fail: bool,
    pub queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeImageSearch {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ImageSearch for FakeImageSearch {
    async fn search_images(
        &self,
        query: &str,
        _num: usize,
    ) -> Result<Vec<ImageResult>, UpstreamError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(UpstreamError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        let slug = query.split_whitespace().next().unwrap_or("x").to_lowercase();
        Ok(["anim.gif", "1.jpg", "2.jpg"]
            .iter()
            .map(|file| ImageResult {
                image_url: format!("https://images.example/{}/{}", slug, file),
            })
            .collect())
    }
}

/// Build a router over the given collaborators with the clock fixed at [`test_now`].
#[allow(dead_code)]
pub fn build_app(
    text: Arc<FakeTextGenerator>,
    images: Arc<FakeImageSearch>,
    store: Arc<dyn UserStore>,
) -> axum::Router {
    let cache = RecommendationCache::new(store, Arc::new(FixedClock(test_now())));
    let generator = RecommendationGenerator::new(text, ImageEnricher::new(images), cache);

    let state = Arc::new(AppState {
        config: Config::test_default(),
        generator,
    });

    create_router(state)
}

/// Test app over an in-memory store with working image search.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemoryStore>,
    pub text: Arc<FakeTextGenerator>,
    pub images: Arc<FakeImageSearch>,
}

#[allow(dead_code)]
pub fn create_test_app(text: Arc<FakeTextGenerator>) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let images = FakeImageSearch::working();
    let router = build_app(text.clone(), images.clone(), store.clone());
    TestApp {
        router,
        store,
        text,
        images,
    }
}

/// Send a request and return the status and decoded JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Model output with three complete destinations.
#[allow(dead_code)]
pub const THREE_DESTINATIONS: &str = r#"[
    {
        "destination": "Bali, Indonesia",
        "description": "Beaches and temples.",
        "activities": ["Visit Ubud Monkey Forest", "Relax on Seminyak Beach", "Explore Uluwatu Temple"],
        "budget": "$50-$100 per day",
        "bestTimeToVisit": "April to October",
        "travelTip": "Rent a scooter."
    },
    {
        "destination": "Kyoto, Japan",
        "description": "Shrines and gardens.",
        "activities": ["Visit Fushimi Inari Shrine", "Explore Arashiyama Bamboo Grove", "Tea ceremony"],
        "budget": "$100-$200 per day",
        "bestTimeToVisit": "March to May",
        "travelTip": "Book early."
    },
    {
        "destination": "Lisbon, Portugal",
        "description": "Hills and tiles.",
        "activities": "Ride Tram 28, Eat pastel de nata, Visit Belem Tower",
        "budget": "$80-$150 per day",
        "bestTimeToVisit": "May to September",
        "travelTip": "Wear comfortable shoes."
    }
]"#;
