// SPDX-License-Identifier: MIT

//! Profile and garage routes.
//!
//! Every garage mutation goes through the collection mutator with the full
//! prior car value supplied by the client; car photos use upload-before-link
//! (the client-generated car id fixes the object path before the car record
//! exists).

use crate::db::fields;
use crate::error::{AppError, Result};
use crate::models::{Car, Identity, Profile};
use crate::services::storage::car_image_path;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;
/// Decoded image payload cap (5 MiB).
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Profile and garage routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route(
            "/api/garage/cars",
            post(add_car).put(update_car).delete(delete_car),
        )
        .route("/api/garage/cars/mods", post(add_mod))
}

// ─── Profile ─────────────────────────────────────────────────

/// Caller's own profile view.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: String,
    pub photo_url: String,
    pub garage: Vec<Car>,
    pub follower_count: usize,
}

impl ProfileResponse {
    fn from_profile(uid: &str, profile: Profile) -> Self {
        Self {
            uid: uid.to_string(),
            email: profile.email,
            display_name: profile.display_name,
            photo_url: profile.photo_url,
            follower_count: profile.followers.len(),
            garage: profile.garage,
        }
    }
}

/// Get the caller's profile, creating it on first access.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.profiles.get_or_create(&identity).await?;
    Ok(Json(ProfileResponse::from_profile(&identity.uid, profile)))
}

// ─── Garage ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCarRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Base64-encoded JPEG payload, uploaded before the car is linked
    pub image_base64: Option<String>,
}

/// Add a car to the caller's garage.
///
/// Upload-before-link: the car id is generated here, the image (if any) is
/// uploaded to a path derived from that id, and the car enters the garage in
/// one step already carrying the final URL. On success no car is ever
/// observable with an empty image when one was supplied.
async fn add_car(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateCarRequest>,
) -> Result<Json<Car>> {
    validate_car_fields(&req.make, &req.model, req.year)?;
    let image_bytes = decode_image(req.image_base64.as_deref())?;

    let car_id = uuid::Uuid::new_v4().to_string();

    let image = match image_bytes {
        Some(bytes) => {
            state
                .storage
                .upload(&car_image_path(&identity.uid, &car_id), bytes)
                .await?
        }
        None => String::new(),
    };

    let car = Car {
        id: car_id,
        make: req.make.trim().to_string(),
        model: req.model.trim().to_string(),
        year: req.year,
        image,
        mods: Vec::new(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state
        .mutator
        .insert(&identity.uid, fields::GARAGE, &car)
        .await?;

    tracing::info!(uid = %identity.uid, car_id = %car.id, "Car added to garage");
    Ok(Json(car))
}

#[derive(Deserialize)]
pub struct UpdateCarRequest {
    /// Full exact prior value; the replace removes by value, not by id
    pub car: Car,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Optional replacement image (uploaded under the same car id)
    pub image_base64: Option<String>,
}

/// Edit a car: upload a new image if supplied, then replace the old value
/// with the updated one. The two halves of the replace are separate round
/// trips; a failure between them leaves the car absent.
async fn update_car(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateCarRequest>,
) -> Result<Json<Car>> {
    validate_car_fields(&req.make, &req.model, req.year)?;
    let image_bytes = decode_image(req.image_base64.as_deref())?;

    let old = req.car;

    let image = match image_bytes {
        Some(bytes) => {
            state
                .storage
                .upload(&car_image_path(&identity.uid, &old.id), bytes)
                .await?
        }
        None => old.image.clone(),
    };

    let updated = Car {
        id: old.id.clone(),
        make: req.make.trim().to_string(),
        model: req.model.trim().to_string(),
        year: req.year,
        image,
        mods: old.mods.clone(),
        created_at: old.created_at.clone(),
    };

    state
        .mutator
        .replace(&identity.uid, fields::GARAGE, &old, &updated)
        .await?;

    tracing::info!(uid = %identity.uid, car_id = %updated.id, "Car updated");
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct DeleteCarRequest {
    /// Full exact prior value
    pub car: Car,
}

#[derive(Serialize)]
pub struct DeleteCarResponse {
    pub success: bool,
    pub message: String,
}

/// Remove a car (and with it, its whole mod log) from the caller's garage.
async fn delete_car(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<DeleteCarRequest>,
) -> Result<Json<DeleteCarResponse>> {
    state
        .mutator
        .remove(&identity.uid, fields::GARAGE, &req.car)
        .await?;

    tracing::info!(uid = %identity.uid, car_id = %req.car.id, "Car deleted");
    Ok(Json(DeleteCarResponse {
        success: true,
        message: "Car deleted".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct AddModRequest {
    /// Full exact prior value of the car being modified
    pub car: Car,
    pub text: String,
}

/// Append a mod to a car. Expressed as a whole-car replace: the prior value
/// is removed and the value with the mod appended is inserted.
async fn add_mod(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<AddModRequest>,
) -> Result<Json<Car>> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Mod text must not be empty".to_string()));
    }

    let old = req.car;
    let updated = old.with_mod(text, chrono::Utc::now().timestamp_millis());

    state
        .mutator
        .replace(&identity.uid, fields::GARAGE, &old, &updated)
        .await?;

    tracing::info!(uid = %identity.uid, car_id = %updated.id, "Mod added");
    Ok(Json(updated))
}

// ─── Validation Helpers ──────────────────────────────────────

fn validate_car_fields(make: &str, model: &str, year: i32) -> Result<()> {
    if make.trim().is_empty() {
        return Err(AppError::BadRequest("Make must not be empty".to_string()));
    }
    if model.trim().is_empty() {
        return Err(AppError::BadRequest("Model must not be empty".to_string()));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::BadRequest(format!(
            "Year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

/// Decode an optional base64 image payload, enforcing the size cap.
pub(crate) fn decode_image(image_base64: Option<&str>) -> Result<Option<Vec<u8>>> {
    let Some(encoded) = image_base64 else {
        return Ok(None);
    };

    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| AppError::BadRequest("Invalid base64 image payload".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Image payload is empty".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(format!(
            "Image payload exceeds {} bytes",
            MAX_IMAGE_BYTES
        )));
    }

    Ok(Some(bytes))
}
