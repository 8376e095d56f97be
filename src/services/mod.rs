// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod filter;
pub mod geo;
pub mod id_token;
pub mod map;
pub mod sort;

pub use filter::{filter_trails, DifficultyFilter, FilterError, TrailFilter};
pub use id_token::{IdTokenError, IdTokenVerifier, VerifiedUser};
pub use map::trails_to_feature_collection;
pub use sort::{sort_trails, SortKey, SortOrder, TrailSort};
