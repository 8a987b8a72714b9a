// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod forum;
pub mod identity;
pub mod profile;

pub use forum::{Comment, Post};
pub use identity::Identity;
pub use profile::{Car, Mod, Profile};
