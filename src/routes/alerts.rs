// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail condition alerts.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::owner::is_same_owner;
use crate::models::{Alert, AlertSeverity};
use crate::routes::trails::load_trail;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trails/{id}/alerts", get(list_alerts))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trails/{id}/alerts", post(create_alert))
        .route("/api/alerts/{id}/resolve", post(resolve_alert))
}

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub message: String,
    #[serde(default)]
    pub severity: AlertSeverity,
}

/// Trimmed alert message, checked against the configured length limit.
fn alert_message(raw: &str, max_len: usize) -> Result<String> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest(
            "Alert message must not be empty".to_string(),
        ));
    }
    if message.chars().count() > max_len {
        return Err(AppError::BadRequest(format!(
            "Alert message must be at most {} characters",
            max_len
        )));
    }
    Ok(message.to_string())
}

async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Path(trail_id): Path<String>,
) -> Result<Json<Vec<Alert>>> {
    load_trail(&state, &trail_id).await?;
    let alerts = state.db.list_active_alerts(&trail_id).await?;
    Ok(Json(alerts))
}

async fn create_alert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<Json<Alert>> {
    let message = alert_message(&req.message, state.config.max_alert_length)?;
    load_trail(&state, &trail_id).await?;

    let alert = Alert {
        id: None,
        trail_id,
        message,
        severity: req.severity,
        active: true,
        created_by: Some(user.uid),
        created_at: now_rfc3339(),
        resolved_at: None,
    };

    let created = state.db.create_alert(&alert).await?;
    Ok(Json(created))
}

/// Resolve an alert. Allowed for its author and for the trail's owner.
async fn resolve_alert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(alert_id): Path<String>,
) -> Result<Json<Alert>> {
    let mut alert = state
        .db
        .get_alert(&alert_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Alert {} not found", alert_id)))?;
    alert.id.get_or_insert_with(|| alert_id.clone());

    let is_author = is_same_owner(alert.created_by.as_deref(), &user.uid);
    let is_trail_owner = if is_author {
        false
    } else {
        load_trail(&state, &alert.trail_id).await?.is_owned_by(&user.uid)
    };

    if !is_author && !is_trail_owner {
        return Err(AppError::Forbidden(
            "Only the alert's author or the trail's creator can resolve it".to_string(),
        ));
    }

    if alert.resolve(&now_rfc3339()) {
        state.db.set_alert(&alert_id, &alert).await?;
        tracing::info!(alert_id = %alert_id, uid = %user.uid, "Alert resolved");
    }

    Ok(Json(alert))
}
