// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON export of trails for the map view.

use crate::models::trail::Trail;
use geo::LineString;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

/// Build a `FeatureCollection` with one Point feature per trailhead and one
/// LineString feature per drawn route.
///
/// Trails without valid geometry are left out; routes need two valid points.
pub fn trails_to_feature_collection(trails: &[Trail]) -> FeatureCollection {
    let mut features = Vec::with_capacity(trails.len() * 2);

    for trail in trails {
        let id = trail.id.clone().unwrap_or_default();

        if let Some(point) = trail.point() {
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&point))),
                id: Some(Id::String(id.clone())),
                properties: Some(properties(trail, "trailhead")),
                foreign_members: None,
            });
        }

        let route = trail.route_points();
        if route.len() >= 2 {
            let line: LineString<f64> = route.iter().map(|p| (p.x(), p.y())).collect();
            let mut props = properties(trail, "route");
            props.insert("routeDistanceKm".to_string(), json!(trail.route_distance_km()));
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&line))),
                id: Some(Id::String(format!("{}-route", id))),
                properties: Some(props),
                foreign_members: None,
            });
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn properties(trail: &Trail, kind: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("kind".to_string(), json!(kind));
    props.insert("trailId".to_string(), json!(trail.id));
    props.insert("name".to_string(), json!(trail.name));
    props.insert("difficulty".to_string(), json!(trail.difficulty));
    props.insert("distance".to_string(), json!(trail.distance_km()));
    props.insert("status".to_string(), json!(trail.status.as_str()));
    props
}
