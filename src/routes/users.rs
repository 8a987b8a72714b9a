// SPDX-License-Identifier: MIT

//! Public user routes: viewing another user's garage and toggling follow.

use crate::error::Result;
use crate::models::{Car, Identity};
use crate::services::FollowState;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// User routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{uid}", get(get_user))
        .route("/api/users/{uid}/follow", post(toggle_follow))
}

/// Public view of another user's profile.
#[derive(Serialize)]
pub struct UserViewResponse {
    pub uid: String,
    pub display_name: String,
    pub photo_url: String,
    pub garage: Vec<Car>,
    pub follower_count: usize,
    /// Whether the caller is currently a follower (from this read's snapshot)
    pub following: bool,
}

/// Another user's garage and follower count.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(uid): Path<String>,
) -> Result<Json<UserViewResponse>> {
    let profile = state.profiles.get(&uid).await?;

    let following = profile.followers.iter().any(|f| f == &identity.uid);

    Ok(Json(UserViewResponse {
        uid,
        display_name: profile.display_name,
        photo_url: profile.photo_url,
        follower_count: profile.followers.len(),
        following,
        garage: profile.garage,
    }))
}

/// Toggle following the target user. Self-follow is a no-op.
async fn toggle_follow(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(uid): Path<String>,
) -> Result<Json<FollowState>> {
    Ok(Json(state.social.toggle_follow(&identity, &uid).await?))
}
