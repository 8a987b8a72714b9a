// SPDX-License-Identifier: MIT

//! Cloud Storage upload service for car and forum images.
//!
//! Uploads a binary payload to the bucket and returns its durable public URL.
//! Linking the URL into the owning document is the caller's job; the two
//! orderings (upload-before-link for cars, create-then-link for posts) live
//! in the routes layer.

use crate::error::AppError;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use std::sync::Arc;

/// Binary object store client.
#[derive(Clone)]
pub struct StorageService {
    bucket: String,
    client: Option<Arc<Client>>,
}

impl StorageService {
    /// Create a new storage service connected to GCS.
    pub async fn new(bucket: &str) -> Result<Self, AppError> {
        let config = ClientConfig::default().with_auth().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create storage auth config: {}", e))
        })?;

        let client = Client::new(config);

        Ok(Self {
            bucket: bucket.to_string(),
            client: Some(Arc::new(client)),
        })
    }

    /// Create a mock storage service for testing (offline mode).
    /// Only available in debug/test builds.
    #[cfg(debug_assertions)]
    pub fn new_mock(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            client: None,
        }
    }

    /// Upload `bytes` to `path` in the bucket and return the public URL.
    ///
    /// No retry: a failed write surfaces as an upload error and the caller
    /// decides whether to proceed without the image or abort.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        // Mock mode (Debug builds only): no network, URL only.
        #[cfg(debug_assertions)]
        {
            if self.client.is_none() {
                return Ok(self.public_url(path));
            }
        }

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::Upload("Storage client not connected".to_string()))?;

        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };
        let upload_type = UploadType::Simple(Media::new(path.to_string()));

        client
            .upload_object(&request, bytes, &upload_type)
            .await
            .map_err(|e| AppError::Upload(format!("Object write failed: {}", e)))?;

        tracing::debug!(path, bucket = %self.bucket, "Uploaded object");

        Ok(self.public_url(path))
    }

    /// Public retrieval address of an object in the bucket.
    fn public_url(&self, path: &str) -> String {
        format!("https://storage.googleapis.com/{}/{}", self.bucket, path)
    }
}

/// Storage object path for a car photo (upload-before-link: the car id is
/// known before the car record exists).
pub fn car_image_path(uid: &str, car_id: &str) -> String {
    format!("users/{}/cars/{}.jpg", uid, car_id)
}

/// Storage object path for a forum post image (create-then-link: the post id
/// is generated by the store first).
pub fn post_image_path(post_id: &str) -> String {
    format!("forums/{}.jpg", post_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_upload_returns_public_url() {
        let storage = StorageService::new_mock("test-bucket");
        let url = storage
            .upload(&car_image_path("u1", "c1"), vec![0xff, 0xd8])
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://storage.googleapis.com/test-bucket/users/u1/cars/c1.jpg"
        );
    }

    #[test]
    fn test_object_paths() {
        assert_eq!(car_image_path("u1", "c1"), "users/u1/cars/c1.jpg");
        assert_eq!(post_image_path("p9"), "forums/p9.jpg");
    }
}
