// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail search, detail and editing routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::trail::normalize_tags;
use crate::models::{Difficulty, Location, Trail, TrailChanges, TrailStatus};
use crate::services::geo::{decode_route, point_distance_km, round_km};
use crate::services::{
    filter_trails, sort_trails, trails_to_feature_collection, DifficultyFilter, SortKey,
    SortOrder, TrailFilter, TrailSort,
};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_PER_PAGE: u32 = 50;
const MAX_PER_PAGE: u32 = 100;

/// Read-only trail routes. Served with optional authentication.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trails", get(list_trails))
        .route("/api/trails/geojson", get(trails_geojson))
        .route("/api/trails/{id}", get(get_trail))
}

/// Trail editing routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trails", post(create_trail))
        .route("/api/trails/{id}", put(update_trail).delete(close_trail))
        .route("/api/trails/{id}/status", post(set_trail_status))
}

// ─── Search ──────────────────────────────────────────────────

/// Which stored statuses a search reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusParam {
    #[default]
    Open,
    Closed,
    All,
}

impl StatusParam {
    fn as_status(self) -> Option<TrailStatus> {
        match self {
            StatusParam::Open => Some(TrailStatus::Open),
            StatusParam::Closed => Some(TrailStatus::Closed),
            StatusParam::All => None,
        }
    }
}

/// Query string accepted by the trail list and map endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailsQuery {
    pub difficulty: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub max_location_distance: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub q: Option<String>,
    #[serde(default)]
    pub show_all: bool,
    #[serde(default)]
    pub my_trails: bool,
    #[serde(default)]
    pub status: StatusParam,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A validated search: store predicate, client-side filter and ordering.
#[derive(Debug, Clone)]
pub struct TrailSearch {
    pub status: Option<TrailStatus>,
    pub filter: TrailFilter,
    pub sort: TrailSort,
    pub reference: Option<Point<f64>>,
    pub owner: Option<String>,
}

impl TrailSearch {
    /// Validate query parameters into a search.
    pub fn from_query(params: &TrailsQuery, user: Option<&AuthUser>) -> Result<Self> {
        let difficulty = match params.difficulty.as_deref() {
            Some(raw) => raw
                .parse::<DifficultyFilter>()
                .map_err(|e| AppError::BadRequest(format!("Invalid difficulty: {}", e)))?,
            None => DifficultyFilter::All,
        };

        let tags = params
            .tags
            .as_deref()
            .map(|raw| normalize_tags(raw.split(',').map(str::to_string).collect()))
            .unwrap_or_default();

        let reference = match (params.lat, params.lng) {
            (Some(lat), Some(lng)) => {
                let location = Location::new(lat, lng);
                location.validate()?;
                Some(location.to_point().ok_or_else(|| {
                    AppError::BadRequest("Invalid reference coordinates".to_string())
                })?)
            }
            (None, None) => None,
            _ => {
                return Err(AppError::BadRequest(
                    "lat and lng must be given together".to_string(),
                ))
            }
        };

        if params.my_trails && user.is_none() {
            return Err(AppError::Unauthorized);
        }

        let filter = TrailFilter {
            difficulty,
            tags,
            min_distance: params.min_distance.unwrap_or(0.0),
            max_distance: params.max_distance.unwrap_or(f64::INFINITY),
            max_location_distance: params.max_location_distance,
            search_query: params.q.clone().unwrap_or_default(),
            show_all: params.show_all,
            my_trails: params.my_trails,
        };
        filter.validate()?;

        Ok(Self {
            status: params.status.as_status(),
            filter,
            sort: TrailSort {
                sort_by: params.sort_by.unwrap_or_default(),
                sort_order: params.sort_order.unwrap_or_default(),
            },
            reference,
            owner: user.map(|u| u.uid.clone()),
        })
    }

    /// Filter then sort a snapshot of trails.
    pub fn apply(&self, trails: Vec<Trail>) -> Vec<Trail> {
        let filtered = filter_trails(
            trails,
            &self.filter,
            self.reference.as_ref(),
            self.owner.as_deref(),
        );
        sort_trails(filtered, &self.sort, self.reference.as_ref())
    }

    async fn run(&self, state: &AppState) -> Result<Vec<Trail>> {
        let trails = state.db.list_trails(self.status).await?;
        let fetched = trails.len();
        let results = self.apply(trails);

        tracing::debug!(
            fetched,
            matched = results.len(),
            sort_by = ?self.sort.sort_by,
            has_reference = self.reference.is_some(),
            "Trail search"
        );
        Ok(results)
    }
}

/// Page number and size after validation.
pub fn page_params(page: Option<u32>, per_page: Option<u32>) -> Result<(u32, u32)> {
    let page = page.unwrap_or(1);
    if page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }

    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
    if per_page < 1 {
        return Err(AppError::BadRequest(
            "perPage must be greater than 0".to_string(),
        ));
    }

    Ok((page, per_page.min(MAX_PER_PAGE)))
}

/// Slice one page out of an ordered result.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Vec<T> {
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect()
}

/// A trail with distances derived for the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrailResponse {
    #[serde(flatten)]
    pub trail: Trail,
    /// From the search reference point to the trailhead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_away_km: Option<f64>,
    /// Length of the drawn route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_distance_km: Option<f64>,
}

impl TrailResponse {
    fn for_search(trail: Trail, reference: Option<&Point<f64>>) -> Self {
        let distance_away_km = reference
            .zip(trail.point())
            .map(|(reference, point)| round_km(point_distance_km(reference, &point)));
        Self {
            trail,
            distance_away_km,
            route_distance_km: None,
        }
    }

    fn for_detail(trail: Trail) -> Self {
        let route_distance_km =
            (!trail.route.is_empty()).then(|| round_km(trail.route_distance_km()));
        Self {
            trail,
            distance_away_km: None,
            route_distance_km,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrailListResponse {
    pub trails: Vec<TrailResponse>,
    /// Number of trails matching the search, across all pages
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

/// Search trails.
async fn list_trails(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<Option<AuthUser>>,
    Query(params): Query<TrailsQuery>,
) -> Result<Json<TrailListResponse>> {
    let search = TrailSearch::from_query(&params, user.as_ref())?;
    let (page, per_page) = page_params(params.page, params.per_page)?;

    let results = search.run(&state).await?;
    let total = results.len() as u32;

    let trails = paginate(results, page, per_page)
        .into_iter()
        .map(|trail| TrailResponse::for_search(trail, search.reference.as_ref()))
        .collect();

    Ok(Json(TrailListResponse {
        trails,
        total,
        page,
        per_page,
    }))
}

/// Search trails and return them as GeoJSON for the map view.
async fn trails_geojson(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<Option<AuthUser>>,
    Query(params): Query<TrailsQuery>,
) -> Result<Json<geojson::FeatureCollection>> {
    let search = TrailSearch::from_query(&params, user.as_ref())?;
    let results = search.run(&state).await?;
    Ok(Json(trails_to_feature_collection(&results)))
}

async fn get_trail(
    State(state): State<Arc<AppState>>,
    Path(trail_id): Path<String>,
) -> Result<Json<TrailResponse>> {
    let trail = load_trail(&state, &trail_id).await?;
    Ok(Json(TrailResponse::for_detail(trail)))
}

/// Fetch a trail or fail with 404.
pub(crate) async fn load_trail(state: &AppState, trail_id: &str) -> Result<Trail> {
    let mut trail = state
        .db
        .get_trail(trail_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trail {} not found", trail_id)))?;
    trail.id.get_or_insert_with(|| trail_id.to_string());
    Ok(trail)
}

// ─── Editing ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrailRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub difficulty: Difficulty,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0))]
    pub elevation_gain: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    #[validate(nested)]
    pub route: Vec<Location>,
    /// Encoded polyline (precision 5), alternative to `route`
    pub route_polyline: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrailRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0))]
    pub elevation_gain: Option<f64>,
    pub tags: Option<Vec<String>>,
    #[validate(nested)]
    pub location: Option<Location>,
    #[validate(nested)]
    pub route: Option<Vec<Location>>,
    pub route_polyline: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: TrailStatus,
}

/// Pick the submitted route: explicit points or an encoded polyline.
fn resolve_route(
    points: Option<Vec<Location>>,
    polyline: Option<&str>,
) -> Result<Option<Vec<Location>>> {
    let polyline = polyline.map(str::trim).filter(|p| !p.is_empty());
    match (points, polyline) {
        (Some(points), Some(_)) if !points.is_empty() => Err(AppError::BadRequest(
            "Provide either route or routePolyline, not both".to_string(),
        )),
        (_, Some(encoded)) => Ok(Some(
            decode_route(encoded)?
                .into_iter()
                .map(Location::from)
                .collect(),
        )),
        (points, None) => Ok(points),
    }
}

fn require_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Trail name must not be blank".to_string()));
    }
    Ok(name.to_string())
}

/// Build a new trail owned by `uid` from a create request.
pub fn new_trail(req: CreateTrailRequest, uid: &str, now: &str) -> Result<Trail> {
    req.validate()?;

    let name = require_name(&req.name)?;
    let route = resolve_route(Some(req.route), req.route_polyline.as_deref())?.unwrap_or_default();

    let route_points: Vec<Point<f64>> = route.iter().filter_map(Location::to_point).collect();
    let distance = match req.distance {
        Some(distance) => distance,
        None if route_points.len() >= 2 => {
            round_km(crate::services::geo::route_distance_km(&route_points))
        }
        None => {
            return Err(AppError::BadRequest(
                "distance is required when no route is given".to_string(),
            ))
        }
    };

    Ok(Trail {
        id: None,
        name,
        description: req.description.filter(|d| !d.trim().is_empty()),
        difficulty: req.difficulty.as_str().to_string(),
        distance: Some(distance),
        elevation_gain: req.elevation_gain,
        tags: normalize_tags(req.tags),
        location: Some(req.location),
        route,
        status: TrailStatus::Open,
        created_by: Some(uid.to_string()),
        created_at: Some(now.to_string()),
        updated_at: Some(now.to_string()),
    })
}

impl UpdateTrailRequest {
    /// Validate and convert into field replacements.
    pub fn into_changes(self) -> Result<TrailChanges> {
        self.validate()?;

        let name = self.name.as_deref().map(require_name).transpose()?;
        let route = resolve_route(self.route, self.route_polyline.as_deref())?;

        Ok(TrailChanges {
            name,
            description: self.description,
            difficulty: self.difficulty,
            distance: self.distance,
            elevation_gain: self.elevation_gain,
            tags: self.tags.map(normalize_tags),
            location: self.location,
            route,
            status: None,
        })
    }
}

/// Load a trail and check the caller owns it.
async fn load_owned_trail(state: &AppState, trail_id: &str, user: &AuthUser) -> Result<Trail> {
    let trail = load_trail(state, trail_id).await?;
    if !trail.is_owned_by(&user.uid) {
        tracing::warn!(trail_id, uid = %user.uid, "Rejected edit by non-owner");
        return Err(AppError::Forbidden(
            "Only the trail's creator can change it".to_string(),
        ));
    }
    Ok(trail)
}

async fn create_trail(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTrailRequest>,
) -> Result<Json<TrailResponse>> {
    let trail = new_trail(req, &user.uid, &now_rfc3339())?;
    let created = state.db.create_trail(&trail).await?;
    Ok(Json(TrailResponse::for_detail(created)))
}

async fn update_trail(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
    Json(req): Json<UpdateTrailRequest>,
) -> Result<Json<TrailResponse>> {
    let changes = req.into_changes()?;
    let mut trail = load_owned_trail(&state, &trail_id, &user).await?;

    trail.apply_changes(changes, &now_rfc3339());
    state.db.set_trail(&trail_id, &trail).await?;

    tracing::info!(trail_id = %trail_id, uid = %user.uid, "Trail updated");
    Ok(Json(TrailResponse::for_detail(trail)))
}

async fn set_trail_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<TrailResponse>> {
    let trail = change_status(&state, &trail_id, &user, req.status).await?;
    Ok(Json(TrailResponse::for_detail(trail)))
}

/// Soft delete: trails are closed, never removed.
async fn close_trail(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trail_id): Path<String>,
) -> Result<Json<TrailResponse>> {
    let trail = change_status(&state, &trail_id, &user, TrailStatus::Closed).await?;
    Ok(Json(TrailResponse::for_detail(trail)))
}

async fn change_status(
    state: &AppState,
    trail_id: &str,
    user: &AuthUser,
    status: TrailStatus,
) -> Result<Trail> {
    let mut trail = load_owned_trail(state, trail_id, user).await?;

    let changes = TrailChanges {
        status: Some(status),
        ..Default::default()
    };
    trail.apply_changes(changes, &now_rfc3339());
    state.db.set_trail(trail_id, &trail).await?;

    tracing::info!(trail_id, status = status.as_str(), "Trail status changed");
    Ok(trail)
}
