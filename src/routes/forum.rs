// SPDX-License-Identifier: MIT

//! Forum routes.
//!
//! Post images use create-then-link: the post document is created first with
//! an empty image reference, the image is uploaded under the generated post
//! id, and the document is then patched with the final URL. Until the patch
//! lands the post is visible without its image.

use crate::error::{AppError, Result};
use crate::models::{Comment, Identity, Post};
use crate::routes::garage::decode_image;
use crate::services::storage::post_image_path;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_POST_CHARS: usize = 5000;

/// Post as returned to clients (document ID included; the stored document
/// itself does not carry an `id` field).
#[derive(Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub author_uid: String,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl PostResponse {
    fn from_post(post: Post) -> Self {
        Self {
            id: post.id.unwrap_or_default(),
            author: post.author,
            author_uid: post.author_uid,
            text: post.text,
            image_url: post.image_url,
            created_at: post.created_at,
        }
    }
}

/// Comment as returned to clients.
#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub author: String,
    pub uid: String,
    pub text: String,
    pub created_at: String,
}

impl CommentResponse {
    fn from_comment(comment: Comment) -> Self {
        Self {
            id: comment.id.unwrap_or_default(),
            author: comment.author,
            uid: comment.uid,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

/// Forum routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/forum/posts", get(list_posts).post(create_post))
        .route("/api/forum/posts/{id}", get(get_post))
        .route(
            "/api/forum/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
}

/// List all posts, newest first. Clients re-issue this query after every
/// create instead of merging optimistically.
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PostResponse>>> {
    let posts = state.forum.list_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from_post).collect()))
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    /// Base64-encoded JPEG payload, linked after the post exists
    pub image_base64: Option<String>,
}

/// Create a post, then upload and link its image if one was supplied.
///
/// An upload failure after the create surfaces as an error while the post
/// (without its image) remains stored; no rollback.
async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<PostResponse>> {
    let text = req.text.trim();
    validate_post_text(text)?;
    let image_bytes = decode_image(req.image_base64.as_deref())?;

    let mut post = state
        .forum
        .create_post(&identity, text, image_bytes.is_some())
        .await?;

    if let Some(bytes) = image_bytes {
        let post_id = post
            .id
            .clone()
            .ok_or_else(|| AppError::Database("Created post has no document ID".to_string()))?;
        let url = state.storage.upload(&post_image_path(&post_id), bytes).await?;
        post = state.forum.link_post_image(&post, &url).await?;
    }

    Ok(Json(PostResponse::from_post(post)))
}

/// A single post.
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>> {
    let post = state.forum.get_post(&id).await?;
    Ok(Json(PostResponse::from_post(post)))
}

/// Comments of a post, oldest first.
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>> {
    let comments = state.forum.list_comments(&id).await?;
    Ok(Json(
        comments
            .into_iter()
            .map(CommentResponse::from_comment)
            .collect(),
    ))
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Append a comment to a post.
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>> {
    let text = req.text.trim();
    validate_post_text(text)?;

    let comment = state.forum.create_comment(&id, &identity, text).await?;
    Ok(Json(CommentResponse::from_comment(comment)))
}

fn validate_post_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(AppError::BadRequest("Text must not be empty".to_string()));
    }
    if text.chars().count() > MAX_POST_CHARS {
        return Err(AppError::BadRequest(format!(
            "Text exceeds {} characters",
            MAX_POST_CHARS
        )));
    }
    Ok(())
}
