// SPDX-License-Identifier: MIT

//! Per-user profile document, created lazily on first access.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Identity, Profile};

/// Get-or-create access to the caller's own profile document.
#[derive(Clone)]
pub struct ProfileService {
    db: FirestoreDb,
}

impl ProfileService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Return the caller's profile, creating it on first access.
    ///
    /// Two near-simultaneous first accesses can both observe "missing" and
    /// both create; the write is a whole-document upsert, so the last writer
    /// wins with no merge. No retry on transient failure; the error surfaces
    /// to the caller.
    pub async fn get_or_create(&self, identity: &Identity) -> Result<Profile, AppError> {
        if let Some(profile) = self.db.get_profile(&identity.uid).await? {
            return Ok(profile);
        }

        let profile = Profile::new_for(identity);
        self.db.upsert_profile(&identity.uid, &profile).await?;

        tracing::info!(uid = %identity.uid, "Created profile on first access");
        Ok(profile)
    }

    /// Read any user's profile (public garage view). Never creates.
    pub async fn get(&self, uid: &str) -> Result<Profile, AppError> {
        self.db
            .get_profile(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))
    }
}
