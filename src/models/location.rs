// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geographic coordinates as stored on trail documents.

use crate::models::numeric::lenient_f64;
use geo::Point;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Location {
    #[serde(alias = "latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    ///
    /// Returns `None` for invalid coordinates so callers can skip them in
    /// geography-dependent computations.
    pub fn to_point(&self) -> Option<Point<f64>> {
        self.is_valid().then(|| Point::new(self.lng, self.lat))
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

#[derive(Deserialize)]
struct RawLocation {
    #[serde(default, alias = "latitude", deserialize_with = "lenient_f64")]
    lat: Option<f64>,
    #[serde(
        default,
        alias = "longitude",
        alias = "lon",
        deserialize_with = "lenient_f64"
    )]
    lng: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeLocation {
    Location(RawLocation),
    Other(IgnoredAny),
}

impl MaybeLocation {
    fn into_location(self) -> Option<Location> {
        match self {
            MaybeLocation::Location(RawLocation {
                lat: Some(lat),
                lng: Some(lng),
            }) => Some(Location { lat, lng }),
            _ => None,
        }
    }
}

/// Deserialize an optional location, mapping malformed values to `None`.
///
/// Range checking is left to [`Location::to_point`].
pub fn lenient_location<'de, D>(deserializer: D) -> Result<Option<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MaybeLocation>::deserialize(deserializer)?.and_then(MaybeLocation::into_location))
}

/// Deserialize a route, dropping points that cannot be read as coordinates.
pub fn lenient_route<'de, D>(deserializer: D) -> Result<Vec<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<MaybeLocation>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(MaybeLocation::into_location)
        .collect())
}
