// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics routes: badges and chart series.
//!
//! Every request reruns the full pipeline over the current dataset.

use crate::error::Result;
use crate::models::{Place, PlaceCategory};
use crate::routes::activities::{filter_table, select_activities, ActivitiesParams};
use crate::routes::{altitude_range, parse_categories};
use crate::services::aggregation::{
    count_places_by_category, days_by_year, grade_progression, min_max_altitude_by_category,
    most_visited_by_category, total_days_badge, GradeProgression, MostVisited,
};
use crate::services::charts::{
    cumulative_days_series, days_by_year_series, situation_series, visits_over_time_series,
    waypoints_by_altitude_series, waypoints_by_year_series, Series,
};
use crate::services::derivation::{derive_activities, explode_waypoints};
use crate::services::translation::place_category_label;
use crate::services::{AltitudeRange, Language};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats/summary", get(get_summary))
        .route("/api/stats/activities", get(get_activity_stats))
        .route("/api/stats/places", get(get_place_stats))
        .route("/api/stats/context", get(get_context_stats))
        .route("/api/stats/grades", get(get_grade_stats))
        .route("/api/stats/waypoints", get(get_waypoint_stats))
}

#[derive(Debug, Deserialize)]
struct LangParams {
    lang: Option<Language>,
}

// ─── Summary badges ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryResponse {
    pub summits: usize,
    pub passes: usize,
    pub huts: usize,
    /// Activities left after the table filters
    pub activities: usize,
    /// Days of those activities, rounded up
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_days: u64,
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesParams>,
) -> Result<Json<SummaryResponse>> {
    let data = state.dataset.snapshot().await;
    let counts = count_places_by_category(&data.places);
    let count = |category: PlaceCategory| counts.get(&category).copied().unwrap_or(0);

    let rows = derive_activities(&data.activities, &state.metadata, state.language(params.lang));
    let rows = select_activities(&rows, &params)?;

    Ok(Json(SummaryResponse {
        summits: count(PlaceCategory::Summit),
        passes: count(PlaceCategory::Pass),
        huts: count(PlaceCategory::Hut),
        activities: rows.len(),
        total_days: total_days_badge(&rows),
    }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivityStatsResponse {
    /// Stacked bars, one series per activity category
    pub days_by_year: Vec<Series<i32, f64>>,
    /// Total over all categories, for the bar annotations
    pub days_per_year: BTreeMap<i32, f64>,
    pub cumulative_days: Vec<Series<i32, f64>>,
}

async fn get_activity_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LangParams>,
) -> Json<ActivityStatsResponse> {
    let activities = state.dataset.activities().await;
    let rows = derive_activities(&activities, &state.metadata, state.language(params.lang));

    Json(ActivityStatsResponse {
        days_by_year: days_by_year_series(&rows, &state.metadata),
        days_per_year: days_by_year(&rows),
        cumulative_days: cumulative_days_series(&rows, &state.metadata),
    })
}

// ─── Places ──────────────────────────────────────────────────

/// One row of the place statistics table.
#[derive(Debug, Serialize)]
pub struct PlaceCategoryStats {
    pub category: PlaceCategory,
    pub label: Option<&'static str>,
    pub count: usize,
    pub lowest: Option<Place>,
    pub highest: Option<Place>,
    pub most_visited: Option<MostVisited>,
}

#[derive(Serialize)]
pub struct PlaceStatsResponse {
    pub categories: Vec<PlaceCategoryStats>,
    /// Stacked bars of visited places per year
    pub visits_by_year: Vec<Series<i32, usize>>,
}

async fn get_place_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LangParams>,
) -> Json<PlaceStatsResponse> {
    let lang = state.language(params.lang);
    let data = state.dataset.snapshot().await;
    let visits = explode_waypoints(&data.activities, &data.places);

    let counts = count_places_by_category(&data.places);
    let mut extremes = min_max_altitude_by_category(&data.places);
    let mut most_visited = most_visited_by_category(&visits);

    let categories = counts
        .into_iter()
        .map(|(category, count)| {
            let extreme = extremes.remove(&category);
            PlaceCategoryStats {
                label: place_category_label(&category, lang),
                count,
                lowest: extreme.as_ref().map(|e| e.lowest.clone()),
                highest: extreme.map(|e| e.highest),
                most_visited: most_visited.remove(&category),
                category,
            }
        })
        .collect();

    Json(PlaceStatsResponse {
        categories,
        visits_by_year: waypoints_by_year_series(&visits, &state.metadata, lang),
    })
}

// ─── Context ─────────────────────────────────────────────────

async fn get_context_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesParams>,
) -> Result<Json<Vec<Series<i32, f64>>>> {
    let lang = state.language(params.lang);
    let activities = params.filter(&state.dataset.activities().await)?;
    let rows = derive_activities(&activities, &state.metadata, lang);
    Ok(Json(situation_series(&rows, lang)))
}

// ─── Grades ──────────────────────────────────────────────────

async fn get_grade_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesParams>,
) -> Result<Json<Vec<GradeProgression>>> {
    let activities = params.filter(&state.dataset.activities().await)?;
    let rows = derive_activities(&activities, &state.metadata, state.language(params.lang));
    Ok(Json(grade_progression(&rows)))
}

// ─── Waypoints ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointView {
    /// Places ranked by altitude
    #[default]
    Altitude,
    /// Visits over time
    Year,
}

#[derive(Debug, Deserialize)]
struct WaypointParams {
    #[serde(default)]
    view: WaypointView,
    /// Comma-separated category codes; absent selects every category,
    /// empty selects none
    categories: Option<String>,
    min_alt: Option<i32>,
    max_alt: Option<i32>,
    /// Activity filters; they only narrow the visits over time
    waypoint: Option<String>,
    from_year: Option<i32>,
    to_year: Option<i32>,
    lang: Option<Language>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum WaypointSeries {
    Altitude(Vec<Series<usize, i32>>),
    Year(Vec<Series<String, i32>>),
}

async fn get_waypoint_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaypointParams>,
) -> Result<Json<WaypointSeries>> {
    let lang = state.language(params.lang);
    let categories = parse_categories(params.categories.as_deref())
        .unwrap_or_else(|| PlaceCategory::ALL.to_vec());
    let altitude = altitude_range(params.min_alt, params.max_alt)?.unwrap_or(AltitudeRange::ANY);
    let data = state.dataset.snapshot().await;
    let activities = filter_table(
        &data.activities,
        params.waypoint.as_deref(),
        params.from_year,
        params.to_year,
    )?;

    let series = match params.view {
        WaypointView::Altitude => WaypointSeries::Altitude(waypoints_by_altitude_series(
            &data.places,
            altitude,
            &categories,
            &state.metadata,
            lang,
        )),
        WaypointView::Year => {
            let visits = explode_waypoints(&activities, &data.places);
            WaypointSeries::Year(visits_over_time_series(
                &visits,
                altitude,
                &categories,
                &state.metadata,
                lang,
            ))
        }
    };
    Ok(Json(series))
}
