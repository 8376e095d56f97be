// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The signed-in user's profile and trail lists.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ListChange, Trail, TrailList, UserProfile};
use crate::routes::trails::load_trail;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/{list}", get(get_list))
        .route(
            "/api/me/{list}/{trail_id}",
            put(add_to_list).delete(remove_from_list),
        )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MyListResponse {
    pub list: TrailList,
    /// Trails still present in the store, in list order
    pub trails: Vec<Trail>,
}

fn parse_list(raw: &str) -> Result<TrailList> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("Unknown list: {}", e)))
}

/// Current profile. Users without a stored profile get an empty one.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_user_profile(&user.uid)
        .await?
        .unwrap_or_else(|| UserProfile::new(&user.uid, &now_rfc3339()));
    Ok(Json(profile))
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(list): Path<String>,
) -> Result<Json<MyListResponse>> {
    let list = parse_list(&list)?;

    let trail_ids = state
        .db
        .get_user_profile(&user.uid)
        .await?
        .map(|profile| profile.list(list).to_vec())
        .unwrap_or_default();

    let trails = state.db.get_trails_by_ids(&trail_ids).await?;
    tracing::debug!(
        uid = %user.uid,
        list = %list,
        listed = trail_ids.len(),
        found = trails.len(),
        "Resolved trail list"
    );

    Ok(Json(MyListResponse { list, trails }))
}

async fn add_to_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((list, trail_id)): Path<(String, String)>,
) -> Result<Json<UserProfile>> {
    let list = parse_list(&list)?;
    load_trail(&state, &trail_id).await?;

    let profile = state
        .db
        .update_trail_list(&user.uid, list, &trail_id, ListChange::Add)
        .await?;
    Ok(Json(profile))
}

/// Removing a trail that is not listed is a no-op.
async fn remove_from_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((list, trail_id)): Path<(String, String)>,
) -> Result<Json<UserProfile>> {
    let list = parse_list(&list)?;

    let profile = state
        .db
        .update_trail_list(&user.uid, list, &trail_id, ListChange::Remove)
        .await?;
    Ok(Json(profile))
}
