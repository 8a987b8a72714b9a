// SPDX-License-Identifier: MIT

//! GarageFeed: social backend for car enthusiasts
//!
//! This crate provides the backend API for user garages (cars and their
//! modification logs), the discussion forum, and the follower graph, all
//! persisted as whole-document collections in Firestore with images in
//! Cloud Storage.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{CollectionMutator, ForumService, ProfileService, SocialService, StorageService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub profiles: ProfileService,
    pub mutator: CollectionMutator,
    pub storage: StorageService,
    pub forum: ForumService,
    pub social: SocialService,
}
