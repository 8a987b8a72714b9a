// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides the document-store primitives the core is built on:
//! - Profile documents (get / upsert)
//! - Array field transforms (union / remove) on a profile document
//! - Forum posts (ordered listing, insert with generated ID, field patch)
//! - Comments (ordered subcollection listing and insert)
//!
//! Array union and remove are the only atomic units offered here. There are
//! no multi-field transactions; anything built from several calls is
//! observably non-atomic.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Comment, Post, Profile};
use firestore::FirestoreQueryDirection;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
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

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile document by uid.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a profile document.
    ///
    /// This is a whole-document write with no merge: when two first accesses
    /// race, the last write wins.
    pub async fn upsert_profile(&self, uid: &str, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Array Field Transforms ──────────────────────────────────

    /// Add a value to an array field of a profile document (array-union).
    ///
    /// Union semantics: a value structurally equal to an existing element is
    /// NOT appended again, so the field never holds exact duplicates.
    pub async fn array_union<T: serde::Serialize>(
        &self,
        uid: &str,
        field: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .transforms(|t| t.fields([t.field(field).append_missing_elements([value])]))
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(e.to_string()))?;
        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove a value from an array field of a profile document
    /// (array-remove).
    ///
    /// Removes ALL elements structurally equal to `value`, and is a silent
    /// no-op when none match.
    pub async fn array_remove<T: serde::Serialize>(
        &self,
        uid: &str,
        field: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .transforms(|t| t.fields([t.field(field).remove_all_from_array([value])]))
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(e.to_string()))?;
        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Forum Post Operations ───────────────────────────────────

    /// List all posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FORUM_POSTS)
            .order_by([("created_at", FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a post by document ID.
    pub async fn get_post(&self, post_id: &str) -> Result<Option<Post>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FORUM_POSTS)
            .obj()
            .one(post_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a post with a store-generated document ID.
    ///
    /// Returns the stored post with its generated `id` populated.
    pub async fn create_post(&self, post: &Post) -> Result<Post, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::FORUM_POSTS)
            .generate_document_id()
            .object(post)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Patch only the `image_url` field of a post.
    ///
    /// Used by create-then-link: the post already exists with an empty image
    /// reference, and this fills in the final URL.
    pub async fn update_post_image(&self, post_id: &str, post: &Post) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(Post::{image_url}))
            .in_col(collections::FORUM_POSTS)
            .document_id(post_id)
            .object(post)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Comment Operations ──────────────────────────────────────

    /// List the comments of a post, oldest first.
    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::FORUM_POSTS, post_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(collections::COMMENTS)
            .parent(&parent_path)
            .order_by([("created_at", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a comment under a post with a store-generated document ID.
    pub async fn create_comment(
        &self,
        post_id: &str,
        comment: &Comment,
    ) -> Result<Comment, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::FORUM_POSTS, post_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .insert()
            .into(collections::COMMENTS)
            .generate_document_id()
            .parent(&parent_path)
            .object(comment)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
