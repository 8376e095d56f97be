// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and route length.

use geo::{LineString, Point};

/// Mean Earth radius used for all distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two lat/lon pairs (degrees), in kilometers.
///
/// NaN inputs propagate to a NaN result.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two `geo` points (x = lon, y = lat).
pub fn point_distance_km(from: &Point<f64>, to: &Point<f64>) -> f64 {
    distance_km(from.y(), from.x(), to.y(), to.x())
}

/// Sum of segment distances along an ordered polyline, in kilometers.
///
/// Fewer than two points have no length.
pub fn route_distance_km(points: &[Point<f64>]) -> f64 {
    points
        .windows(2)
        .map(|pair| point_distance_km(&pair[0], &pair[1]))
        .sum()
}

/// [`route_distance_km`] for a `LineString`.
pub fn line_distance_km(line: &LineString<f64>) -> f64 {
    line.lines()
        .map(|segment| distance_km(segment.start.y, segment.start.x, segment.end.y, segment.end.x))
        .sum()
}

/// Round a distance to two decimals, as stored on submitted trails.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Decode an encoded polyline (precision 5) into route points.
pub fn decode_route(encoded: &str) -> Result<Vec<Point<f64>>, GeoError> {
    let line = polyline::decode_polyline(encoded, 5)
        .map_err(|e| GeoError::Polyline(e.to_string()))?;

    line.points()
        .map(|p| {
            if (-90.0..=90.0).contains(&p.y()) && (-180.0..=180.0).contains(&p.x()) {
                Ok(p)
            } else {
                Err(GeoError::OutOfRange {
                    lat: p.y(),
                    lng: p.x(),
                })
            }
        })
        .collect()
}

/// Errors from route decoding.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Failed to decode polyline: {0}")]
    Polyline(String),

    #[error("Coordinate out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}
