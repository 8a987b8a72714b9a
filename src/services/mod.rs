// SPDX-License-Identifier: MIT

//! Services module - business logic layer.
//!
//! Each service is a leaf: none of them calls another. The car-edit use case
//! in the routes layer is the one place where two of them (storage and the
//! collection mutator) are invoked in sequence.

pub mod collections;
pub mod forum;
pub mod profile;
pub mod social;
pub mod storage;

pub use collections::CollectionMutator;
pub use forum::ForumService;
pub use profile::ProfileService;
pub use social::{FollowState, SocialService};
pub use storage::StorageService;
