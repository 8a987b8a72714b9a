// SPDX-License-Identifier: MIT

//! Two-level post/comment store, ordered by creation time.
//!
//! No incremental in-memory state: every create writes, then re-reads from
//! the store. Timestamps and document IDs are assigned at write time here,
//! never by the app client, so a caller cannot know the final sort position
//! of an item it just created until it re-queries the list.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Comment, Identity, Post};

/// Forum post and comment operations.
#[derive(Clone)]
pub struct ForumService {
    db: FirestoreDb,
}

impl ForumService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// All posts, newest first (true store ordering, not a client-side sort).
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.db.list_posts().await
    }

    /// A single post by ID.
    pub async fn get_post(&self, post_id: &str) -> Result<Post, AppError> {
        self.db
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))
    }

    /// Create a post and return it as stored.
    ///
    /// `will_attach_image` marks the post with an empty image reference so a
    /// create-then-link upload can patch it afterwards; until that patch
    /// lands the post is visible without its image.
    pub async fn create_post(
        &self,
        identity: &Identity,
        text: &str,
        will_attach_image: bool,
    ) -> Result<Post, AppError> {
        let post = Post {
            id: None,
            author: identity
                .display_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
            author_uid: identity.uid.clone(),
            text: text.to_string(),
            image_url: will_attach_image.then(String::new),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created = self.db.create_post(&post).await?;
        let post_id = created
            .id
            .clone()
            .ok_or_else(|| AppError::Database("Created post has no document ID".to_string()))?;

        // Read back rather than trusting the local value: the stored document
        // is the source of truth for ordering and generated fields.
        let stored = self
            .db
            .get_post(&post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        tracing::info!(post_id = %post_id, author_uid = %identity.uid, "Forum post created");
        Ok(stored)
    }

    /// Patch a post's image URL after its upload completed, then return the
    /// post as stored.
    pub async fn link_post_image(&self, post: &Post, url: &str) -> Result<Post, AppError> {
        let post_id = post
            .id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Post has no document ID".to_string()))?;

        let mut patched = post.clone();
        patched.image_url = Some(url.to_string());
        self.db.update_post_image(post_id, &patched).await?;

        self.db
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))
    }

    /// Comments of a post, oldest first.
    ///
    /// Returns NotFound when the post itself is absent.
    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        self.get_post(post_id).await?;
        self.db.list_comments(post_id).await
    }

    /// Append a comment to a post and return it as stored.
    pub async fn create_comment(
        &self,
        post_id: &str,
        identity: &Identity,
        text: &str,
    ) -> Result<Comment, AppError> {
        self.get_post(post_id).await?;

        let comment = Comment {
            id: None,
            author: identity
                .display_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
            uid: identity.uid.clone(),
            text: text.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created = self.db.create_comment(post_id, &comment).await?;

        tracing::info!(post_id, author_uid = %identity.uid, "Comment added");
        Ok(created)
    }
}
