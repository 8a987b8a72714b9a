// SPDX-License-Identifier: MIT

//! GarageFeed API Server
//!
//! Backend for the GarageFeed mobile app: profiles with a garage of cars and
//! mod logs, a discussion forum, and a one-sided follower graph.

use garagefeed::{
    config::Config,
    db::FirestoreDb,
    services::{CollectionMutator, ForumService, ProfileService, SocialService, StorageService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting GarageFeed API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize Cloud Storage for images
    let storage = StorageService::new(&config.storage_bucket)
        .await
        .expect("Failed to connect to Cloud Storage");
    tracing::info!(bucket = %config.storage_bucket, "Storage service initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        profiles: ProfileService::new(db.clone()),
        mutator: CollectionMutator::new(db.clone()),
        forum: ForumService::new(db.clone()),
        social: SocialService::new(db.clone()),
        storage,
        db,
    });

    // Build router
    let app = garagefeed::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garagefeed=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
