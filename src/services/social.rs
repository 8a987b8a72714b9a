// SPDX-License-Identifier: MIT

//! Follower graph: toggle membership in another user's follower set.

use crate::db::{fields, FirestoreDb};
use crate::error::AppError;
use crate::models::Identity;
use serde::Serialize;

/// Result of a follow toggle (or a state read).
#[derive(Debug, Clone, Serialize)]
pub struct FollowState {
    /// Whether the viewer now follows the target
    pub following: bool,
    /// Follower count from the post-toggle re-read
    pub follower_count: usize,
}

/// One-sided follower graph operations.
#[derive(Clone)]
pub struct SocialService {
    db: FirestoreDb,
}

impl SocialService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Toggle the viewer's membership in `target_uid`'s follower set.
    ///
    /// Self-follow is a no-op, not an error. The add-or-remove decision is
    /// taken from the last-read snapshot and not re-verified at write time;
    /// two racing toggles from the same viewer can land in either state. The
    /// array primitives themselves are idempotent, so no state outside
    /// {member, not member} can result. After the write the target document
    /// is re-read so the caller sees its own write reflected in the count.
    pub async fn toggle_follow(
        &self,
        viewer: &Identity,
        target_uid: &str,
    ) -> Result<FollowState, AppError> {
        let snapshot = self
            .db
            .get_profile(target_uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target_uid)))?;

        if viewer.uid == target_uid {
            return Ok(FollowState {
                following: false,
                follower_count: snapshot.followers.len(),
            });
        }

        let was_following = snapshot.followers.iter().any(|f| f == &viewer.uid);

        if was_following {
            self.db
                .array_remove(target_uid, fields::FOLLOWERS, &viewer.uid)
                .await?;
        } else {
            self.db
                .array_union(target_uid, fields::FOLLOWERS, &viewer.uid)
                .await?;
        }

        let refreshed = self
            .db
            .get_profile(target_uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target_uid)))?;

        tracing::info!(
            viewer = %viewer.uid,
            target = %target_uid,
            following = !was_following,
            "Follow toggled"
        );

        Ok(FollowState {
            following: !was_following,
            follower_count: refreshed.followers.len(),
        })
    }
}
