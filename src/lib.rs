// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trailhead: discover, filter and review hiking trails.
//!
//! This crate provides the backend API: trail search (client-side filter
//! and sort over Firestore snapshots), map export, alerts, reviews, photos
//! and per-user trail lists.

pub mod config;
pub mod db;
pub mod error;
pub mod format_utils;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::IdTokenVerifier;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub id_token_verifier: Arc<IdTokenVerifier>,
}
