// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Trails (trail documents, soft-deleted by status)
//! - Alerts (condition reports attached to a trail)
//! - Reviews (one per user per trail)
//! - Users (profile and trail lists)
//! - Photos (uploaded image metadata)
//!
//! Queries only use equality predicates; richer filtering happens in
//! `services::filter` over the returned documents.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{
    Alert, ListChange, Review, Trail, TrailList, TrailPhoto, TrailStatus, UserProfile,
};
use crate::time_utils::now_rfc3339;
use firestore::FirestoreConsistencySelector;
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator does not check credentials, so skip the credential
        // lookup entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Trail Operations ────────────────────────────────────────

    /// List trails, optionally restricted to one status.
    pub async fn list_trails(&self, status: Option<TrailStatus>) -> Result<Vec<Trail>, AppError> {
        let query = self.get_client()?.fluent().select().from(collections::TRAILS);

        let query = if let Some(status) = status {
            query.filter(move |q| q.field("status").eq(status.as_str()))
        } else {
            query
        };

        let trails: Vec<Trail> = query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(count = trails.len(), status = ?status, "Loaded trails");
        Ok(trails)
    }

    /// Get a trail by document ID.
    pub async fn get_trail(&self, trail_id: &str) -> Result<Option<Trail>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRAILS)
            .obj()
            .one(trail_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Resolve trail IDs to trails, keeping the order of `trail_ids`.
    ///
    /// IDs without a document are skipped.
    pub async fn get_trails_by_ids(&self, trail_ids: &[String]) -> Result<Vec<Trail>, AppError> {
        stream::iter(trail_ids.to_vec())
            .map(|trail_id| async move { self.get_trail(&trail_id).await })
            .buffered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<Trail>, AppError>>>()
            .await
            .into_iter()
            .filter_map(Result::transpose)
            .collect()
    }

    /// Store a new trail under a generated document ID.
    ///
    /// Returns the stored trail with `id` populated.
    pub async fn create_trail(&self, trail: &Trail) -> Result<Trail, AppError> {
        let doc = Trail {
            id: None,
            ..trail.clone()
        };

        let created: Trail = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::TRAILS)
            .generate_document_id()
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(trail_id = ?created.id, name = %created.name, "Trail created");
        Ok(created)
    }

    /// Overwrite a trail document.
    pub async fn set_trail(&self, trail_id: &str, trail: &Trail) -> Result<(), AppError> {
        let doc = Trail {
            id: None,
            ..trail.clone()
        };

        let _: Trail = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRAILS)
            .document_id(trail_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Alert Operations ────────────────────────────────────────

    /// Active alerts for a trail, newest first.
    pub async fn list_active_alerts(&self, trail_id: &str) -> Result<Vec<Alert>, AppError> {
        let trail_id = trail_id.to_string();

        let mut alerts: Vec<Alert> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ALERTS)
            .filter(move |q| {
                q.for_all([
                    q.field("trailId").eq(trail_id.clone()),
                    q.field("active").eq(true),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // RFC 3339 timestamps sort lexicographically.
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    pub async fn get_alert(&self, alert_id: &str) -> Result<Option<Alert>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ALERTS)
            .obj()
            .one(alert_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new alert under a generated document ID.
    pub async fn create_alert(&self, alert: &Alert) -> Result<Alert, AppError> {
        let doc = Alert {
            id: None,
            ..alert.clone()
        };

        let created: Alert = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::ALERTS)
            .generate_document_id()
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            alert_id = ?created.id,
            trail_id = %created.trail_id,
            severity = ?created.severity,
            "Alert created"
        );
        Ok(created)
    }

    pub async fn set_alert(&self, alert_id: &str, alert: &Alert) -> Result<(), AppError> {
        let doc = Alert {
            id: None,
            ..alert.clone()
        };

        let _: Alert = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ALERTS)
            .document_id(alert_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Review Operations ───────────────────────────────────────

    pub async fn list_reviews(&self, trail_id: &str) -> Result<Vec<Review>, AppError> {
        let trail_id = trail_id.to_string();

        let mut reviews: Vec<Review> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::REVIEWS)
            .filter(move |q| q.field("trailId").eq(trail_id.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    pub async fn get_review(
        &self,
        trail_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::REVIEWS)
            .obj()
            .one(&Review::document_id(trail_id, user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace the author's review of a trail.
    pub async fn upsert_review(&self, review: &Review) -> Result<(), AppError> {
        let doc_id = Review::document_id(&review.trail_id, &review.user_id);

        let _: Review = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::REVIEWS)
            .document_id(&doc_id)
            .object(review)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn upsert_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: UserProfile = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.uid)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Add or remove a trail in one of the user's lists.
    ///
    /// The profile is read and written inside one transaction, so a
    /// concurrent edit makes the commit fail instead of being overwritten. A missing profile is created.
    /// Returns the resulting profile.
    pub async fn update_trail_list(
        &self,
        uid: &str,
        list: TrailList,
        trail_id: &str,
        change: ListChange,
    ) -> Result<UserProfile, AppError> {
        let now = now_rfc3339();
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Reading under the transaction makes the commit fail if another
        // request changed the profile in between.
        let current: Option<UserProfile> = client
            .clone_with_consistency_selector(FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ))
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read profile in transaction: {}", e))
            })?;

        let mut profile = current.unwrap_or_else(|| UserProfile::new(uid, &now));

        if !profile.apply_list_change(list, trail_id, change, &now) {
            tracing::debug!(uid, list = %list, trail_id, "Trail list unchanged");
            let _ = transaction.rollback().await;
            return Ok(profile);
        }

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&profile)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add profile to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(uid, list = %list, trail_id, change = ?change, "Trail list updated");
        Ok(profile)
    }

    // ─── Photo Operations ────────────────────────────────────────

    pub async fn list_photos(&self, trail_id: &str) -> Result<Vec<TrailPhoto>, AppError> {
        let trail_id = trail_id.to_string();

        let mut photos: Vec<TrailPhoto> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::PHOTOS)
            .filter(move |q| q.field("trailId").eq(trail_id.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    /// Register photo metadata under a generated document ID.
    pub async fn create_photo(&self, photo: &TrailPhoto) -> Result<TrailPhoto, AppError> {
        let doc = TrailPhoto {
            id: None,
            ..photo.clone()
        };

        let created: TrailPhoto = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::PHOTOS)
            .generate_document_id()
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            photo_id = ?created.id,
            trail_id = %created.trail_id,
            size_bytes = created.size_bytes,
            "Photo registered"
        );
        Ok(created)
    }
}
