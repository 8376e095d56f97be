// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo metadata. The blob itself lives in object storage.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrailPhoto {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub trail_id: String,
    /// Public download URL
    pub url: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub size_bytes: u64,
    pub content_type: String,
    pub uploaded_by: String,
    pub created_at: String,
}
