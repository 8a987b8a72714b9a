// SPDX-License-Identifier: MIT

//! User profile model: one document per identity, embedding the garage and
//! the follower set as array fields.

use crate::models::Identity;
use serde::{Deserialize, Serialize};

/// User profile stored in Firestore, keyed by uid.
///
/// The owning identity is the only writer of `garage`; any identity may
/// add or remove itself in `followers` (the one cross-identity mutation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Email address (may be None if not shared by the identity provider)
    pub email: Option<String>,
    /// Display name
    pub display_name: String,
    /// Profile picture URL ("" if none)
    pub photo_url: String,
    /// Owned cars, addressed by value (see [`Car`])
    #[serde(default)]
    pub garage: Vec<Car>,
    /// UIDs of followers. One-sided: there is no reciprocal `following` field.
    #[serde(default)]
    pub followers: Vec<String>,
}

impl Profile {
    /// Default profile for a first access, seeded from the identity.
    pub fn new_for(identity: &Identity) -> Self {
        Self {
            email: identity.email.clone(),
            display_name: identity.display_name.clone().unwrap_or_default(),
            photo_url: identity.photo_url.clone().unwrap_or_default(),
            garage: Vec::new(),
            followers: Vec::new(),
        }
    }
}

/// A car in a user's garage.
///
/// `id` is assigned once at creation and never changes, but it is NOT usable
/// for point updates: the store's array-remove primitive matches by the full
/// value, so every mutation must supply the exact prior `Car`. The `id` only
/// makes an edited car recognizable as "the same car" across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Stable client-generated ID (UUID v4). At most one garage element may
    /// carry a given id; a duplicate would make remove-by-value ambiguous.
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Public URL of the uploaded photo ("" if none)
    pub image: String,
    /// Modification log, append-only
    #[serde(default)]
    pub mods: Vec<Mod>,
    /// RFC3339 creation timestamp
    pub created_at: String,
}

impl Car {
    /// Copy of this car with one more mod appended.
    ///
    /// Mods are never edited in place; the whole car value is replaced.
    pub fn with_mod(&self, text: &str, date_millis: i64) -> Self {
        let mut updated = self.clone();
        updated.mods.push(Mod {
            text: text.to_string(),
            date: date_millis,
        });
        updated
    }
}

/// A single modification entry. No stable id; distinguished only by
/// content and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub text: String,
    /// Epoch milliseconds
    pub date: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            display_name: Some("Test Driver".to_string()),
            photo_url: None,
            email: Some("driver@example.com".to_string()),
        }
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = Profile::new_for(&test_identity());
        assert_eq!(profile.display_name, "Test Driver");
        assert_eq!(profile.photo_url, "");
        assert!(profile.garage.is_empty());
        assert!(profile.followers.is_empty());
    }

    #[test]
    fn test_with_mod_appends_and_keeps_identity() {
        let car = Car {
            id: "c1".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2001,
            image: String::new(),
            mods: vec![],
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let updated = car.with_mod("turbo", 1_700_000_000_000);

        assert_eq!(updated.id, car.id);
        assert_eq!(updated.mods.len(), 1);
        assert_eq!(updated.mods[0].text, "turbo");
        // The original value is untouched; it is still needed as the exact
        // remove target of the replace.
        assert!(car.mods.is_empty());
        assert_ne!(car, updated);
    }
}
