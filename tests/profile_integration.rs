// SPDX-License-Identifier: MIT

//! Profile document integration tests.
//!
//! These tests require the Firestore emulator to be running.

use garagefeed::models::Profile;
use garagefeed::services::ProfileService;

mod common;
use common::{test_db, test_identity, unique_uid};

#[tokio::test]
async fn test_get_or_create_creates_on_first_access() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid("profile");
    let identity = test_identity(&uid);
    let profiles = ProfileService::new(db.clone());

    // Nothing there yet
    assert!(db.get_profile(&uid).await.unwrap().is_none());

    let created = profiles.get_or_create(&identity).await.unwrap();
    assert_eq!(created.display_name, "Test Driver");
    assert_eq!(created.email.as_deref(), Some("driver@example.com"));
    assert!(created.garage.is_empty());
    assert!(created.followers.is_empty());

    // Second access returns the stored document, does not recreate
    let again = profiles.get_or_create(&identity).await.unwrap();
    assert_eq!(again, created);
}

#[tokio::test]
async fn test_racing_first_creates_last_writer_wins() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid("profile-race");
    let identity = test_identity(&uid);

    // Both candidates observed "missing" and write the whole document.
    let candidate_a = Profile {
        display_name: "Writer A".to_string(),
        ..Profile::new_for(&identity)
    };
    let candidate_b = Profile {
        display_name: "Writer B".to_string(),
        ..Profile::new_for(&identity)
    };

    let (res_a, res_b) = tokio::join!(
        db.upsert_profile(&uid, &candidate_a),
        db.upsert_profile(&uid, &candidate_b),
    );
    res_a.unwrap();
    res_b.unwrap();

    // The final value is exactly one of the candidates, never a merge.
    let stored = db.get_profile(&uid).await.unwrap().unwrap();
    assert!(
        stored == candidate_a || stored == candidate_b,
        "Stored profile must equal one candidate, got {:?}",
        stored
    );
}
