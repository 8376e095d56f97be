// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail ordering.

use crate::models::trail::Trail;
use crate::services::geo::point_distance_km;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Distance,
    /// Distance from the reference point to the trailhead
    DistanceAway,
    Difficulty,
    Elevation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailSort {
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Ordinal of a stored difficulty string. Unknown values rank 0.
pub fn difficulty_rank(difficulty: &str) -> u8 {
    match difficulty.trim().to_ascii_lowercase().as_str() {
        "easy" => 1,
        "moderate" => 2,
        "hard" | "difficult" => 3,
        "expert" => 4,
        _ => 0,
    }
}

enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            // Keys within one sort are always the same variant.
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        }
    }
}

fn sort_value(trail: &Trail, key: SortKey, reference: Option<&Point<f64>>) -> SortValue {
    match key {
        SortKey::Name => SortValue::Text(trail.name.to_lowercase()),
        SortKey::Distance => SortValue::Number(trail.distance_km()),
        SortKey::DistanceAway => SortValue::Number(match reference {
            // Without a reference point every trail is "0 km away", which
            // leaves the input order intact.
            None => 0.0,
            Some(reference) => trail
                .point()
                .map(|p| point_distance_km(reference, &p))
                .unwrap_or(f64::INFINITY),
        }),
        SortKey::Difficulty => SortValue::Number(f64::from(difficulty_rank(&trail.difficulty))),
        SortKey::Elevation => SortValue::Number(trail.elevation_gain_m()),
    }
}

/// Order trails by `sort`, returning a new vector.
///
/// The sort is stable in both directions: `Desc` reverses the key comparison,
/// so trails with equal keys keep their input order.
pub fn sort_trails(
    trails: Vec<Trail>,
    sort: &TrailSort,
    reference: Option<&Point<f64>>,
) -> Vec<Trail> {
    let mut keyed: Vec<(SortValue, Trail)> = trails
        .into_iter()
        .map(|trail| (sort_value(&trail, sort.sort_by, reference), trail))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match sort.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, trail)| trail).collect()
}
