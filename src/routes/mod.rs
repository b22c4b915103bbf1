// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod activities;
pub mod places;
pub mod stats;

use crate::error::{AppError, Result};
use crate::models::PlaceCategory;
use crate::services::{AltitudeRange, YearRange};
use crate::AppState;
use axum::http::{header, Method};
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub places: usize,
    pub activities: usize,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    let data = state.dataset.snapshot().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        places: data.places.len(),
        activities: data.activities.len(),
    })
}

/// Parse a comma-separated list query parameter.
///
/// `None` when the parameter is absent; `Some(vec![])` when it is present
/// but empty, which filters differently depending on the view.
pub(crate) fn split_list(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
}

/// Parse a `categories` query parameter into place categories.
pub(crate) fn parse_categories(raw: Option<&str>) -> Option<Vec<PlaceCategory>> {
    split_list(raw).map(|codes| codes.into_iter().map(PlaceCategory::from).collect())
}

/// Reject bounds given in the wrong order.
fn check_bounds(what: &str, low: Option<i32>, high: Option<i32>) -> Result<()> {
    match (low, high) {
        (Some(low), Some(high)) if low > high => Err(AppError::BadRequest(format!(
            "{} range is inverted: {} > {}",
            what, low, high
        ))),
        _ => Ok(()),
    }
}

/// Altitude range from optional bounds; a missing bound is open.
pub(crate) fn altitude_range(min: Option<i32>, max: Option<i32>) -> Result<Option<AltitudeRange>> {
    check_bounds("altitude", min, max)?;
    if min.is_none() && max.is_none() {
        return Ok(None);
    }
    Ok(Some(AltitudeRange::new(
        min.unwrap_or(AltitudeRange::ANY.min),
        max.unwrap_or(AltitudeRange::ANY.max),
    )))
}

/// Year range from optional bounds; a missing bound is open.
pub(crate) fn year_range(from: Option<i32>, to: Option<i32>) -> Result<Option<YearRange>> {
    check_bounds("year", from, to)?;
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    Ok(Some(YearRange {
        from: from.unwrap_or(i32::MIN),
        to: to.unwrap_or(i32::MAX),
    }))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .merge(places::routes())
        .merge(activities::routes())
        .merge(stats::routes())
        .layer(middleware::from_fn(crate::middleware::add_api_headers))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
