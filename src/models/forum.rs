// SPDX-License-Identifier: MIT

//! Forum models: posts and their comment subcollection.

use serde::{Deserialize, Serialize};

/// A forum post. Document ID is generated by the store on insert and is
/// surfaced back through the `_firestore_id` alias on reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Firestore document ID (None until the document is written)
    #[serde(alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Author display name at posting time
    pub author: String,
    /// Author uid
    pub author_uid: String,
    /// Post body
    pub text: String,
    /// Image URL once linked. `Some("")` marks a post whose image upload is
    /// still pending (create-then-link leaves this window observable).
    pub image_url: Option<String>,
    /// RFC3339 timestamp, assigned at write time by this service
    pub created_at: String,
}

/// A comment under a post. Append-only, listed in `created_at` ascending
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Firestore document ID (None until written)
    #[serde(alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Author display name at posting time
    pub author: String,
    /// Author uid
    pub uid: String,
    /// Comment body
    pub text: String,
    /// RFC3339 timestamp, assigned at write time by this service
    pub created_at: String,
}
