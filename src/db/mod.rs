// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const TRAILS: &str = "trails";
    pub const ALERTS: &str = "alerts";
    /// One document per (trail, user), keyed `{trail_id}_{user_id}`
    pub const REVIEWS: &str = "reviews";
    /// Profiles and trail lists, keyed by uid
    pub const USERS: &str = "users";
    pub const PHOTOS: &str = "photos";
}
