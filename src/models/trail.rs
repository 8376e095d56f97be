// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail model for storage and API.

use crate::models::location::{lenient_location, lenient_route, Location};
use crate::models::numeric::{lenient_f64, or_zero};
use crate::models::owner::is_same_owner;
use crate::services::geo::route_distance_km;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Trail difficulty as accepted on submission.
///
/// Stored documents keep the raw string (older records use other spellings),
/// so reads compare case-insensitively against [`Difficulty::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive comparison against a stored difficulty string.
    pub fn matches(&self, stored: &str) -> bool {
        stored.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.matches(s))
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Open/closed state. Closing is how trails are deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TrailStatus {
    #[default]
    Open,
    Closed,
}

impl TrailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailStatus::Open => "open",
            TrailStatus::Closed => "closed",
        }
    }
}

/// Stored trail record in Firestore.
///
/// Field names are camelCase because the same documents are read and written
/// by the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Trail {
    /// Document ID
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw difficulty string ("Easy", "moderate", ...)
    #[serde(default)]
    pub difficulty: String,
    /// Length in kilometers
    #[serde(default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    /// Elevation gain in meters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub elevation_gain: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Trailhead location
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<Location>,
    /// Drawn route, in order
    #[serde(default, deserialize_with = "lenient_route")]
    pub route: Vec<Location>,
    #[serde(default)]
    pub status: TrailStatus,
    /// Owner: raw user id or a `users/{uid}` path
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Trail {
    /// Distance in km with the missing-means-zero fallback.
    pub fn distance_km(&self) -> f64 {
        or_zero(self.distance)
    }

    /// Elevation gain in meters with the missing-means-zero fallback.
    pub fn elevation_gain_m(&self) -> f64 {
        or_zero(self.elevation_gain)
    }

    /// Trailhead as a `geo` point, if the stored location is valid.
    pub fn point(&self) -> Option<Point<f64>> {
        self.location.as_ref().and_then(Location::to_point)
    }

    /// Valid route points in order.
    pub fn route_points(&self) -> Vec<Point<f64>> {
        self.route.iter().filter_map(Location::to_point).collect()
    }

    /// Length of the drawn route in km (0 without a route).
    pub fn route_distance_km(&self) -> f64 {
        route_distance_km(&self.route_points())
    }

    pub fn is_owned_by(&self, uid: &str) -> bool {
        is_same_owner(self.created_by.as_deref(), uid)
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == tag)
    }

    /// Replace every field present in `changes`.
    pub fn apply_changes(&mut self, changes: TrailChanges, now: &str) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(difficulty) = changes.difficulty {
            self.difficulty = difficulty.as_str().to_string();
        }
        if let Some(distance) = changes.distance {
            self.distance = Some(distance);
        }
        if let Some(elevation_gain) = changes.elevation_gain {
            self.elevation_gain = Some(elevation_gain);
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(location) = changes.location {
            self.location = Some(location);
        }
        if let Some(route) = changes.route {
            self.route = route;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Some(now.to_string());
    }
}

/// A partial edit: `Some` fields replace the stored value wholesale.
#[derive(Debug, Clone, Default)]
pub struct TrailChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub distance: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub location: Option<Location>,
    pub route: Option<Vec<Location>>,
    pub status: Option<TrailStatus>,
}

/// Normalize submitted tags: trimmed, non-empty, de-duplicated ignoring case.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        let folded = tag.to_lowercase();
        if tag.is_empty() || out.iter().any(|t| t.to_lowercase() == folded) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}
