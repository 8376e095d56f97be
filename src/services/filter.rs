// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side trail filtering.
//!
//! The store only applies simple equality predicates; everything richer
//! (difficulty, tags, distance band, radius, name search, ownership) is
//! evaluated here over the returned snapshot.

use crate::models::owner::is_same_owner;
use crate::models::trail::{Difficulty, Trail};
use crate::services::geo::point_distance_km;
use geo::Point;

/// Difficulty criterion: everything, or a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl std::str::FromStr for DifficultyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

/// Active filter criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailFilter {
    pub difficulty: DifficultyFilter,
    /// Match-any, case-insensitive. Empty means no tag criterion.
    pub tags: Vec<String>,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Radius around the reference point, in km.
    pub max_location_distance: Option<f64>,
    /// Case-insensitive substring of the trail name.
    pub search_query: String,
    /// Bypass every other criterion.
    pub show_all: bool,
    /// Only trails created by the requesting user.
    pub my_trails: bool,
}

impl Default for TrailFilter {
    fn default() -> Self {
        Self {
            difficulty: DifficultyFilter::All,
            tags: Vec::new(),
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            max_location_distance: None,
            search_query: String::new(),
            show_all: false,
            my_trails: false,
        }
    }
}

impl TrailFilter {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.min_distance.is_nan() || self.max_distance.is_nan() || self.min_distance < 0.0 {
            return Err(FilterError::InvalidDistance);
        }
        if self.min_distance > self.max_distance {
            return Err(FilterError::InvertedRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if let Some(radius) = self.max_location_distance {
            if radius.is_nan() || radius < 0.0 {
                return Err(FilterError::InvalidRadius(radius));
            }
        }
        Ok(())
    }

    /// Evaluate every active criterion against one trail, in order.
    pub fn matches(&self, trail: &Trail, reference: Option<&Point<f64>>, owner: Option<&str>) -> bool {
        if self.show_all {
            return true;
        }

        if self.my_trails {
            let owned = owner.is_some_and(|uid| is_same_owner(trail.created_by.as_deref(), uid));
            if !owned {
                return false;
            }
        }

        if let DifficultyFilter::Only(difficulty) = self.difficulty {
            if !difficulty.matches(&trail.difficulty) {
                return false;
            }
        }

        let mut requested_tags = self.tags.iter().filter(|t| !t.trim().is_empty()).peekable();
        if requested_tags.peek().is_some() && !requested_tags.any(|t| trail.has_tag(t)) {
            return false;
        }

        let distance = trail.distance_km();
        if distance < self.min_distance || distance > self.max_distance {
            return false;
        }

        if let (Some(reference), Some(radius)) = (reference, self.max_location_distance) {
            let within = trail
                .point()
                .is_some_and(|p| point_distance_km(reference, &p) <= radius);
            if !within {
                return false;
            }
        }

        let query = self.search_query.trim();
        if !query.is_empty() && !trail.name.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }

        true
    }
}

/// Keep the trails matching `filter`, preserving input order.
///
/// `reference` is the point radius checks are measured from; `owner` is the
/// requesting user's id for `my_trails`.
pub fn filter_trails(
    trails: Vec<Trail>,
    filter: &TrailFilter,
    reference: Option<&Point<f64>>,
    owner: Option<&str>,
) -> Vec<Trail> {
    if filter.show_all {
        return trails;
    }

    trails
        .into_iter()
        .filter(|trail| filter.matches(trail, reference, owner))
        .collect()
}

/// Invalid filter configuration.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Distance bounds must be non-negative numbers")]
    InvalidDistance,

    #[error("minDistance ({min}) must not exceed maxDistance ({max})")]
    InvertedRange { min: f64, max: f64 },

    #[error("maxLocationDistance must be a non-negative number, got {0}")]
    InvalidRadius(f64),
}
