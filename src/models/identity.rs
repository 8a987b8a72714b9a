// SPDX-License-Identifier: MIT

//! Authenticated identity, as provided by the external identity provider.

/// The caller's identity, extracted from a verified session token.
///
/// Every core operation that writes on behalf of a user takes this as an
/// explicit argument; nothing reads it from ambient state.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Opaque user ID (document ID in the `users` collection)
    pub uid: String,
    /// Display name, if the provider shared one
    pub display_name: Option<String>,
    /// Profile photo URL, if the provider shared one
    pub photo_url: Option<String>,
    /// Email address, if the provider shared one
    pub email: Option<String>,
}
