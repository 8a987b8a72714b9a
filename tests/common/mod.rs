// SPDX-License-Identifier: MIT

use garagefeed::config::Config;
use garagefeed::db::FirestoreDb;
use garagefeed::models::{Car, Identity};
use garagefeed::routes::create_router;
use garagefeed::services::{
    CollectionMutator, ForumService, ProfileService, SocialService, StorageService,
};
use garagefeed::AppState;
use std::sync::Arc;

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

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let state = Arc::new(AppState {
        config,
        profiles: ProfileService::new(db.clone()),
        mutator: CollectionMutator::new(db.clone()),
        forum: ForumService::new(db.clone()),
        social: SocialService::new(db.clone()),
        storage: StorageService::new_mock("test-bucket"),
        db,
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by the emulator (mock storage only).
#[allow(dead_code)]
pub async fn create_test_app_online() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;

    let state = Arc::new(AppState {
        config,
        profiles: ProfileService::new(db.clone()),
        mutator: CollectionMutator::new(db.clone()),
        forum: ForumService::new(db.clone()),
        social: SocialService::new(db.clone()),
        storage: StorageService::new_mock("test-bucket"),
        db,
    });

    (create_router(state.clone()), state)
}

/// Mint a session JWT the way the identity provider would.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, display_name: &str, signing_key: &[u8]) -> String {
    garagefeed::middleware::auth::create_jwt(uid, Some(display_name), signing_key)
        .expect("Failed to create test JWT")
}

/// Generate a unique uid for test isolation.
#[allow(dead_code)]
pub fn unique_uid(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

/// Identity for a test user.
#[allow(dead_code)]
pub fn test_identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        display_name: Some("Test Driver".to_string()),
        photo_url: None,
        email: Some("driver@example.com".to_string()),
    }
}

/// A basic test car.
#[allow(dead_code)]
pub fn test_car(id: &str) -> Car {
    Car {
        id: id.to_string(),
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2001,
        image: String::new(),
        mods: vec![],
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}
