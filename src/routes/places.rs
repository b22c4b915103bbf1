// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place routes: the map and the "new place" form.

use crate::error::Result;
use crate::models::{Place, PlaceCategory, WAYPOINT_SEPARATOR};
use crate::routes::{altitude_range, parse_categories, split_list};
use crate::services::dataset::place_names;
use crate::services::map::{build_map, MapData, MapQuery};
use crate::services::{AltitudeRange, Language};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/places", get(list_places).post(create_place))
        .route("/api/map", get(get_map))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
    /// Sorted place names for the search dropdown
    pub names: Vec<String>,
    /// Altitude bounds for the slider, absent when there are no places
    pub altitude: Option<AltitudeRange>,
}

async fn list_places(State(state): State<Arc<AppState>>) -> Json<PlacesResponse> {
    let places = state.dataset.places().await;
    Json(PlacesResponse {
        names: place_names(&places),
        altitude: AltitudeRange::spanning(&places),
        places,
    })
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MapParams {
    /// Comma-separated place names
    search: Option<String>,
    /// Comma-separated category codes; empty shows every category
    categories: Option<String>,
    min_alt: Option<i32>,
    max_alt: Option<i32>,
    lang: Option<Language>,
}

async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> Result<Json<MapData>> {
    let query = MapQuery {
        search: split_list(params.search.as_deref()),
        categories: parse_categories(params.categories.as_deref()).unwrap_or_default(),
        altitude: altitude_range(params.min_alt, params.max_alt)?,
    };
    let places = state.dataset.places().await;

    let data = build_map(&places, &query, &state.metadata, state.language(params.lang));
    tracing::debug!(
        visible = data.places.features.len(),
        zoom = data.view.zoom,
        "Map rendered"
    );
    Ok(Json(data))
}

// ─── Creation ────────────────────────────────────────────────

/// Body of the "new place" form.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_place_request"))]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 200))]
    pub waypoint: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0, max = 9000))]
    pub altitude: i32,
    pub category: PlaceCategory,
}

fn validate_place_request(req: &CreatePlaceRequest) -> std::result::Result<(), ValidationError> {
    if req.waypoint.trim() != req.waypoint {
        return Err(ValidationError::new("waypoint_whitespace")
            .with_message("waypoint must not start or end with whitespace".into()));
    }
    if req.waypoint.contains(WAYPOINT_SEPARATOR) {
        return Err(ValidationError::new("waypoint_separator")
            .with_message("waypoint must not contain \", \"".into()));
    }
    if let PlaceCategory::Other(code) = &req.category {
        return Err(ValidationError::new("unknown_category")
            .with_message(format!("unknown place category: {}", code).into()));
    }
    Ok(())
}

impl From<CreatePlaceRequest> for Place {
    fn from(req: CreatePlaceRequest) -> Self {
        Place {
            waypoint: req.waypoint,
            latitude: req.latitude,
            longitude: req.longitude,
            altitude: req.altitude,
            category: req.category,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreatePlaceResponse {
    /// Sorted place names including the new one
    pub names: Vec<String>,
    pub updated_at: String,
}

async fn create_place(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<CreatePlaceResponse>)> {
    req.validate()?;

    let names = state.dataset.add_place(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePlaceResponse {
            names,
            updated_at: format_utc_rfc3339(chrono::Utc::now()),
        }),
    ))
}
