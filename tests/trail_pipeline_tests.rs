// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter and sort pipeline over stored trail documents.
//!
//! Trails are built from JSON the way they come back from Firestore, so the
//! lenient field handling (string numbers, bad coordinates, path owners) is
//! exercised together with the pipeline.

use geo::Point;
use serde_json::{json, Value};
use trailhead::format_utils::format_size;
use trailhead::middleware::AuthUser;
use trailhead::models::{Difficulty, Trail};
use trailhead::routes::trails::{TrailSearch, TrailsQuery};
use trailhead::services::geo::{distance_km, route_distance_km};
use trailhead::services::{
    filter_trails, sort_trails, DifficultyFilter, SortKey, SortOrder, TrailFilter, TrailSort,
};

fn trail(value: Value) -> Trail {
    serde_json::from_value(value).expect("trail document")
}

fn names(trails: &[Trail]) -> Vec<&str> {
    trails.iter().map(|t| t.name.as_str()).collect()
}

fn sort(sort_by: SortKey, sort_order: SortOrder) -> TrailSort {
    TrailSort {
        sort_by,
        sort_order,
    }
}

/// A small catalogue with the kinds of irregularities stored data has.
fn catalogue() -> Vec<Trail> {
    vec![
        trail(json!({
            "_firestore_id": "windy-hill",
            "name": "Windy Hill Loop",
            "difficulty": "Moderate",
            "distance": 7.2,
            "elevationGain": 400,
            "tags": ["Views", "dogs"],
            "location": { "lat": 37.364, "lng": -122.245 },
            "createdBy": "users/alice"
        })),
        trail(json!({
            "_firestore_id": "rancho",
            "name": "Rancho Meadow",
            "difficulty": "easy",
            "distance": "3.5",
            "tags": ["family"],
            "location": { "latitude": 37.331, "longitude": -122.087 },
            "createdBy": "bob"
        })),
        trail(json!({
            "_firestore_id": "mission-peak",
            "name": "Mission Peak",
            "difficulty": "HARD",
            "distance": 9.8,
            "elevationGain": "lots",
            "tags": ["views"],
            "location": { "lat": 37.512, "lng": -121.881 },
            "createdBy": "alice"
        })),
        trail(json!({
            "_firestore_id": "lost",
            "name": "Lost Trail",
            "difficulty": "Easy",
            "location": { "lat": "north", "lng": -122.0 }
        })),
    ]
}

// ─── Distances and sizes ─────────────────────────────────────

#[test]
fn test_distance_properties() {
    let points = [(0.0, 0.0), (37.4, -122.1), (-33.9, 151.2), (89.9, 179.9)];
    for &(lat1, lon1) in &points {
        assert_eq!(distance_km(lat1, lon1, lat1, lon1), 0.0);
        for &(lat2, lon2) in &points {
            let there = distance_km(lat1, lon1, lat2, lon2);
            let back = distance_km(lat2, lon2, lat1, lon1);
            assert!((there - back).abs() < 1e-9);
            assert!(there >= 0.0);
        }
    }
    assert!((distance_km(0.0, 0.0, 0.0, 1.0) - 111.195).abs() < 0.001);
}

#[test]
fn test_route_distance_properties() {
    let p = Point::new(-122.1, 37.4);
    let q = Point::new(-122.0, 37.5);
    let r = Point::new(-121.9, 37.45);

    assert_eq!(route_distance_km(&[]), 0.0);
    assert_eq!(route_distance_km(&[p]), 0.0);

    let expected = distance_km(p.y(), p.x(), q.y(), q.x()) + distance_km(q.y(), q.x(), r.y(), r.x());
    assert!((route_distance_km(&[p, q, r]) - expected).abs() < 1e-9);
}

#[test]
fn test_format_size_table() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(1024), "1.0 KB");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(1024 * 1024), "1.00 MB");
    assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
}

// ─── Filtering ───────────────────────────────────────────────

#[test]
fn test_show_all_returns_input_unchanged() {
    let filter = TrailFilter {
        show_all: true,
        difficulty: DifficultyFilter::Only(Difficulty::Hard),
        tags: vec!["nothing".to_string()],
        min_distance: 100.0,
        max_distance: 200.0,
        max_location_distance: Some(0.0),
        search_query: "zzz".to_string(),
        my_trails: true,
    };
    let input = catalogue();
    let out = filter_trails(input.clone(), &filter, Some(&Point::new(0.0, 0.0)), None);
    assert_eq!(out, input);
}

#[test]
fn test_difficulty_subset_is_exact() {
    let filter = TrailFilter {
        difficulty: DifficultyFilter::Only(Difficulty::Easy),
        ..Default::default()
    };
    let input = catalogue();
    let expected: Vec<Trail> = input
        .iter()
        .filter(|t| t.difficulty.to_lowercase() == "easy")
        .cloned()
        .collect();

    let out = filter_trails(input, &filter, None, None);
    assert_eq!(out, expected);
    assert_eq!(names(&out), vec!["Rancho Meadow", "Lost Trail"]);
}

#[test]
fn test_max_distance_is_monotone() {
    let mut previous = usize::MAX;
    for max_distance in [f64::INFINITY, 10.0, 9.8, 7.2, 5.0, 3.5, 1.0, 0.0] {
        let filter = TrailFilter {
            max_distance,
            ..Default::default()
        };
        let len = filter_trails(catalogue(), &filter, None, None).len();
        assert!(len <= previous, "maxDistance {max_distance} grew the result");
        previous = len;
    }
}

#[test]
fn test_string_distances_are_coerced() {
    let filter = TrailFilter {
        min_distance: 3.0,
        max_distance: 4.0,
        ..Default::default()
    };
    let out = filter_trails(catalogue(), &filter, None, None);
    assert_eq!(names(&out), vec!["Rancho Meadow"]);
}

#[test]
fn test_radius_skips_trails_without_geometry() {
    let filter = TrailFilter {
        max_location_distance: Some(50.0),
        ..Default::default()
    };
    let palo_alto = Point::new(-122.14, 37.44);
    let out = filter_trails(catalogue(), &filter, Some(&palo_alto), None);
    assert_eq!(
        names(&out),
        vec!["Windy Hill Loop", "Rancho Meadow", "Mission Peak"]
    );

    let tight = TrailFilter {
        max_location_distance: Some(15.0),
        ..Default::default()
    };
    let out = filter_trails(catalogue(), &tight, Some(&palo_alto), None);
    assert_eq!(names(&out), vec!["Windy Hill Loop", "Rancho Meadow"]);
}

#[test]
fn test_my_trails_normalizes_owner_paths() {
    let filter = TrailFilter {
        my_trails: true,
        ..Default::default()
    };
    let out = filter_trails(catalogue(), &filter, None, Some("alice"));
    assert_eq!(names(&out), vec!["Windy Hill Loop", "Mission Peak"]);
}

#[test]
fn test_tags_and_search_combine() {
    let filter = TrailFilter {
        tags: vec!["VIEWS".to_string(), "family".to_string()],
        search_query: "  peak".to_string(),
        ..Default::default()
    };
    let out = filter_trails(catalogue(), &filter, None, None);
    assert_eq!(names(&out), vec!["Mission Peak"]);
}

#[test]
fn test_tag_filter_folds_non_ascii_case() {
    let trails = vec![
        trail(json!({ "name": "Col d'Été", "tags": ["Été"] })),
        trail(json!({ "name": "Hiver", "tags": ["hiver"] })),
    ];
    let filter = TrailFilter {
        tags: vec!["ÉTÉ".to_string()],
        ..Default::default()
    };
    let out = filter_trails(trails, &filter, None, None);
    assert_eq!(names(&out), vec!["Col d'Été"]);
}

// ─── Sorting ─────────────────────────────────────────────────

#[test]
fn test_two_trail_scenario() {
    let trails = vec![
        trail(json!({ "name": "B", "distance": 5 })),
        trail(json!({ "name": "A", "distance": 10 })),
    ];

    let by_name = sort_trails(trails.clone(), &sort(SortKey::Name, SortOrder::Asc), None);
    assert_eq!(names(&by_name), vec!["A", "B"]);

    let by_distance = sort_trails(trails, &sort(SortKey::Distance, SortOrder::Desc), None);
    assert_eq!(names(&by_distance), vec!["A", "B"]);
}

#[test]
fn test_distance_away_scenario() {
    let trails = vec![
        trail(json!({ "name": "Far", "location": { "lat": 0.0, "lng": 1.0 } })),
        trail(json!({ "name": "Here", "location": { "lat": 0.0, "lng": 0.0 } })),
    ];
    let reference = Point::new(0.0, 0.0);

    let out = sort_trails(
        trails,
        &sort(SortKey::DistanceAway, SortOrder::Asc),
        Some(&reference),
    );
    assert_eq!(names(&out), vec!["Here", "Far"]);
}

#[test]
fn test_name_desc_is_reverse_of_asc() {
    let asc = sort_trails(catalogue(), &sort(SortKey::Name, SortOrder::Asc), None);
    let desc = sort_trails(catalogue(), &sort(SortKey::Name, SortOrder::Desc), None);

    let mut reversed = names(&asc);
    reversed.reverse();
    assert_eq!(names(&desc), reversed);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let trails = vec![
        trail(json!({ "name": "one", "elevationGain": 100 })),
        trail(json!({ "name": "two", "elevationGain": "n/a" })),
        trail(json!({ "name": "three", "elevationGain": 100 })),
        trail(json!({ "name": "four" })),
    ];

    let asc = sort_trails(trails.clone(), &sort(SortKey::Elevation, SortOrder::Asc), None);
    assert_eq!(names(&asc), vec!["two", "four", "one", "three"]);

    let desc = sort_trails(trails, &sort(SortKey::Elevation, SortOrder::Desc), None);
    assert_eq!(names(&desc), vec!["one", "three", "two", "four"]);
}

#[test]
fn test_sort_does_not_mutate_input() {
    let input = catalogue();
    let before = input.clone();
    let _ = sort_trails(input.clone(), &sort(SortKey::Difficulty, SortOrder::Desc), None);
    assert_eq!(input, before);
}

// ─── Whole search ────────────────────────────────────────────

#[test]
fn test_search_from_query_string_values() {
    let query: TrailsQuery = serde_json::from_value(json!({
        "difficulty": "all",
        "tags": "views",
        "lat": 37.44,
        "lng": -122.14,
        "sortBy": "distanceAway",
        "sortOrder": "asc"
    }))
    .unwrap();

    let search = TrailSearch::from_query(&query, None).unwrap();
    let out = search.apply(catalogue());
    assert_eq!(names(&out), vec!["Windy Hill Loop", "Mission Peak"]);
}

#[test]
fn test_search_my_trails_by_difficulty_desc() {
    let query: TrailsQuery = serde_json::from_value(json!({
        "myTrails": true,
        "sortBy": "difficulty",
        "sortOrder": "desc"
    }))
    .unwrap();
    let user = AuthUser {
        uid: "alice".to_string(),
    };

    let search = TrailSearch::from_query(&query, Some(&user)).unwrap();
    let out = search.apply(catalogue());
    assert_eq!(names(&out), vec!["Mission Peak", "Windy Hill Loop"]);
}
