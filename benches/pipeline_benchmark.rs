// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use criterion::{criterion_group, criterion_main, Criterion};
use geo::Point;
use serde_json::json;
use std::hint::black_box;
use trailhead::models::Trail;
use trailhead::services::{
    filter_trails, sort_trails, trails_to_feature_collection, DifficultyFilter, SortKey,
    SortOrder, TrailFilter, TrailSort,
};

const DIFFICULTIES: [&str; 4] = ["Easy", "moderate", "HARD", "Expert"];
const TAGS: [&str; 5] = ["views", "dogs", "family", "shade", "waterfall"];

/// A catalogue spread over the Bay Area, with the odd malformed field.
fn generate_trails(count: usize) -> Vec<Trail> {
    (0..count)
        .map(|i| {
            let lat = 37.0 + (i % 97) as f64 * 0.01;
            let lng = -122.5 + (i % 89) as f64 * 0.01;
            let distance = if i % 13 == 0 {
                json!("n/a")
            } else {
                json!((i % 40) as f64 * 0.5)
            };
            let route: Vec<_> = (0..20)
                .map(|j| json!({ "lat": lat + j as f64 * 0.001, "lng": lng + j as f64 * 0.001 }))
                .collect();

            serde_json::from_value(json!({
                "_firestore_id": format!("trail-{i}"),
                "name": format!("Trail {}", count - i),
                "difficulty": DIFFICULTIES[i % DIFFICULTIES.len()],
                "distance": distance,
                "elevationGain": (i * 37 % 900),
                "tags": [TAGS[i % TAGS.len()], TAGS[(i + 2) % TAGS.len()]],
                "location": { "lat": lat, "lng": lng },
                "route": route,
                "createdBy": format!("users/user-{}", i % 50),
            }))
            .expect("generated trail")
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let trails = generate_trails(2_000);
    let reference = Point::new(-122.14, 37.44);

    let filter = TrailFilter {
        difficulty: DifficultyFilter::All,
        tags: vec!["views".to_string(), "shade".to_string()],
        min_distance: 2.0,
        max_distance: 15.0,
        max_location_distance: Some(40.0),
        search_query: "trail 1".to_string(),
        ..Default::default()
    };
    let by_distance_away = TrailSort {
        sort_by: SortKey::DistanceAway,
        sort_order: SortOrder::Asc,
    };
    let by_name = TrailSort {
        sort_by: SortKey::Name,
        sort_order: SortOrder::Desc,
    };

    let mut group = c.benchmark_group("trail_pipeline");

    group.bench_function("filter_radius_and_tags", |b| {
        b.iter(|| {
            filter_trails(
                black_box(trails.clone()),
                &filter,
                Some(&reference),
                None,
            )
        })
    });

    group.bench_function("sort_distance_away", |b| {
        b.iter(|| sort_trails(black_box(trails.clone()), &by_distance_away, Some(&reference)))
    });

    group.bench_function("sort_name_desc", |b| {
        b.iter(|| sort_trails(black_box(trails.clone()), &by_name, None))
    });

    group.bench_function("feature_collection", |b| {
        b.iter(|| trails_to_feature_collection(black_box(&trails)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
