// SPDX-License-Identifier: MIT

//! Forum integration tests: ordering guarantees and create-then-link.

use garagefeed::error::AppError;
use garagefeed::services::storage::post_image_path;
use garagefeed::services::{ForumService, StorageService};

mod common;
use common::{test_db, test_identity, unique_uid};

#[tokio::test]
async fn test_posts_listed_newest_first() {
    require_emulator!();

    let db = test_db().await;
    let forum = ForumService::new(db.clone());
    let identity = test_identity(&unique_uid("poster"));

    let first = forum
        .create_post(&identity, "first post", false)
        .await
        .unwrap();
    let second = forum
        .create_post(&identity, "second post", false)
        .await
        .unwrap();

    let posts = forum.list_posts().await.unwrap();

    // Shared collection: other tests write here too, so assert on relative
    // order rather than absolute positions.
    let pos_first = posts.iter().position(|p| p.id == first.id).unwrap();
    let pos_second = posts.iter().position(|p| p.id == second.id).unwrap();
    assert!(
        pos_second < pos_first,
        "Newer post must come before older post"
    );

    for pair in posts.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "Posts must be ordered by created_at descending"
        );
    }
}

#[tokio::test]
async fn test_created_post_is_read_back_from_store() {
    require_emulator!();

    let db = test_db().await;
    let forum = ForumService::new(db.clone());
    let identity = test_identity(&unique_uid("poster"));

    let post = forum.create_post(&identity, "hello", false).await.unwrap();

    let id = post.id.clone().expect("Stored post must carry its document ID");
    assert_eq!(post.author, "Test Driver");
    assert_eq!(post.author_uid, identity.uid);
    assert!(post.image_url.is_none());

    let fetched = forum.get_post(&id).await.unwrap();
    assert_eq!(fetched, post);
}

#[tokio::test]
async fn test_comments_listed_oldest_first() {
    require_emulator!();

    let db = test_db().await;
    let forum = ForumService::new(db.clone());
    let identity = test_identity(&unique_uid("commenter"));

    let post = forum
        .create_post(&identity, "comment thread", false)
        .await
        .unwrap();
    let post_id = post.id.unwrap();

    for text in ["one", "two", "three"] {
        forum
            .create_comment(&post_id, &identity, text)
            .await
            .unwrap();
    }

    let comments = forum.list_comments(&post_id).await.unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(
        comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
        vec!["one", "two", "three"]
    );
    for pair in comments.windows(2) {
        assert!(
            pair[0].created_at <= pair[1].created_at,
            "Comments must be ordered by created_at ascending"
        );
    }
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    require_emulator!();

    let db = test_db().await;
    let forum = ForumService::new(db.clone());
    let identity = test_identity(&unique_uid("commenter"));

    let err = forum
        .create_comment("no-such-post", &identity, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_create_then_link_post_image() {
    require_emulator!();

    let db = test_db().await;
    let forum = ForumService::new(db.clone());
    let storage = StorageService::new_mock("test-bucket");
    let identity = test_identity(&unique_uid("poster"));

    // Step 1: the post exists with an empty image reference.
    let post = forum
        .create_post(&identity, "with image", true)
        .await
        .unwrap();
    assert_eq!(post.image_url.as_deref(), Some(""));
    let post_id = post.id.clone().unwrap();

    // Step 2: upload under the generated id; step 3: patch the record.
    let url = storage
        .upload(&post_image_path(&post_id), vec![0xff, 0xd8])
        .await
        .unwrap();
    let linked = forum.link_post_image(&post, &url).await.unwrap();

    assert_eq!(linked.image_url.as_deref(), Some(url.as_str()));

    let fetched = forum.get_post(&post_id).await.unwrap();
    assert_eq!(fetched.image_url.as_deref(), Some(url.as_str()));
    // Everything else untouched by the patch
    assert_eq!(fetched.text, "with image");
    assert_eq!(fetched.created_at, post.created_at);
}
