// SPDX-License-Identifier: MIT

//! Value-identity mutation of array fields on a profile document.
//!
//! The store has no "update one element of a nested list" primitive, so every
//! edit of an embedded record is expressed as remove-old-value then
//! add-new-value against the whole array field. The quirks of that encoding
//! are part of the contract here, not accidents to be smoothed over:
//!
//! - `insert` has set-union semantics: an exact duplicate collapses to a
//!   single occurrence.
//! - `remove` deletes every element structurally equal to the given value.
//! - `replace` is two independent round trips with an observable window in
//!   which the collection contains neither the old nor the new value.

use crate::db::FirestoreDb;
use crate::error::AppError;

/// Remove+insert mutator for array-valued, value-addressed sub-collections
/// (`garage`, `followers`).
#[derive(Clone)]
pub struct CollectionMutator {
    db: FirestoreDb,
}

impl CollectionMutator {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Append `value` to the array field (idempotent set-union append).
    pub async fn insert<T: serde::Serialize>(
        &self,
        owner_uid: &str,
        field: &str,
        value: &T,
    ) -> Result<(), AppError> {
        self.db.array_union(owner_uid, field, value).await
    }

    /// Remove every element structurally equal to `value`.
    ///
    /// The caller must supply the full, exact prior value; there is no
    /// partial-field match.
    pub async fn remove<T: serde::Serialize>(
        &self,
        owner_uid: &str,
        field: &str,
        value: &T,
    ) -> Result<(), AppError> {
        self.db.array_remove(owner_uid, field, value).await
    }

    /// Replace `old` with `new`: `remove(old)` then `insert(new)`.
    ///
    /// NOT atomic. Between the two round trips a concurrent reader sees the
    /// element missing, and a concurrent replace/remove racing on the same
    /// `old` value can find nothing to remove (lost-update hazard). A failure
    /// after the remove leaves the collection without either value; no
    /// rollback is attempted.
    pub async fn replace<T: serde::Serialize>(
        &self,
        owner_uid: &str,
        field: &str,
        old: &T,
        new: &T,
    ) -> Result<(), AppError> {
        self.remove(owner_uid, field, old).await?;
        self.insert(owner_uid, field, new).await?;
        Ok(())
    }
}
