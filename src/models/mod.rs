// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod alert;
pub mod location;
pub mod numeric;
pub mod owner;
pub mod photo;
pub mod review;
pub mod trail;
pub mod user;

pub use alert::{Alert, AlertSeverity};
pub use location::Location;
pub use photo::TrailPhoto;
pub use review::Review;
pub use trail::{Difficulty, Trail, TrailChanges, TrailStatus};
pub use user::{ListChange, TrailList, UserProfile};
