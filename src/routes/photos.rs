// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail photo metadata. Clients upload the image to object storage and
//! register it here.

use crate::error::{AppError, Result};
use crate::format_utils::format_size;
use crate::middleware::auth::AuthUser;
use crate::models::TrailPhoto;
use crate::routes::trails::load_trail;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trails/{id}/photos", get(list_photos))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trails/{id}/photos", post(register_photo))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPhotoRequest {
    pub url: String,
    pub size_bytes: u64,
    pub content_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PhotoResponse {
    #[serde(flatten)]
    pub photo: TrailPhoto,
    /// e.g. "2.50 MB"
    pub size_label: String,
}

impl From<TrailPhoto> for PhotoResponse {
    fn from(photo: TrailPhoto) -> Self {
        Self {
            size_label: format_size(photo.size_bytes),
            photo,
        }
    }
}

/// Check an upload against the accepted types and size limit.
fn check_upload(req: &RegisterPhotoRequest, max_bytes: u64) -> Result<()> {
    let url = req.url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(AppError::BadRequest(
            "Photo url must be an http(s) URL".to_string(),
        ));
    }

    if !req
        .content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
    {
        return Err(AppError::BadRequest(format!(
            "Unsupported content type {:?}: only images are accepted",
            req.content_type
        )));
    }

    if req.size_bytes == 0 {
        return Err(AppError::BadRequest("Photo is empty".to_string()));
    }

    if req.size_bytes > max_bytes {
        return Err(AppError::BadRequest(format!(
            "Photo is {}; the limit is {}",
            format_size(req.size_bytes),
            format_size(max_bytes)
        )));
    }

    Ok(())
}

async fn list_photos(
    State(state): State<Arc<AppState>>,
    Path(trail_id): Path<String>,
) -> Result<Json<Vec<PhotoResponse>>> {
    load_trail(&state, &trail_id).await?;
    let photos = state.db.list_photos(&trail_id).await?;
    Ok(Json(photos.into_iter().map(PhotoResponse::from).collect()))
}

async fn register_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
    Json(req): Json<RegisterPhotoRequest>,
) -> Result<Json<PhotoResponse>> {
    check_upload(&req, state.config.max_photo_bytes)?;
    load_trail(&state, &trail_id).await?;

    let photo = TrailPhoto {
        id: None,
        trail_id,
        url: req.url.trim().to_string(),
        size_bytes: req.size_bytes,
        content_type: req.content_type.trim().to_ascii_lowercase(),
        uploaded_by: user.uid,
        created_at: now_rfc3339(),
    };

    let created = state.db.create_photo(&photo).await?;
    Ok(Json(created.into()))
}
