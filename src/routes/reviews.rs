// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail reviews: one per user per trail.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::review::average_rating;
use crate::models::Review;
use crate::routes::trails::load_trail;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trails/{id}/reviews", get(list_reviews))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trails/{id}/reviews", put(upsert_review))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub count: u32,
    /// `None` until the trail has a review
    pub average_rating: Option<f64>,
}

impl ReviewsResponse {
    fn new(reviews: Vec<Review>) -> Self {
        Self {
            count: reviews.len() as u32,
            average_rating: average_rating(&reviews),
            reviews,
        }
    }
}

async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(trail_id): Path<String>,
) -> Result<Json<ReviewsResponse>> {
    load_trail(&state, &trail_id).await?;
    let reviews = state.db.list_reviews(&trail_id).await?;
    Ok(Json(ReviewsResponse::new(reviews)))
}

/// Create the caller's review, or replace it keeping the original `createdAt`.
async fn upsert_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<Review>> {
    req.validate()?;
    load_trail(&state, &trail_id).await?;

    let now = now_rfc3339();
    let existing = state.db.get_review(&trail_id, &user.uid).await?;

    let review = Review {
        trail_id,
        user_id: user.uid,
        rating: req.rating,
        comment: req
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        updated_at: existing.as_ref().map(|_| now.clone()),
        created_at: existing.map(|r| r.created_at).unwrap_or(now),
    };

    state.db.upsert_review(&review).await?;

    tracing::info!(
        trail_id = %review.trail_id,
        uid = %review.user_id,
        rating = review.rating,
        "Review saved"
    );
    Ok(Json(review))
}
