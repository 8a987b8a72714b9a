// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const FORUM_POSTS: &str = "forum_posts";
    /// Subcollection under each forum post
    pub const COMMENTS: &str = "comments";
}

/// Array field names on the user profile document.
pub mod fields {
    pub const GARAGE: &str = "garage";
    pub const FOLLOWERS: &str = "followers";
}
