// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes: the table, the edit form and the detail panel.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityCategory, Context, DerivedActivity, Role};
use crate::routes::year_range;
use crate::services::aggregation::total_days_badge;
use crate::services::derivation::derive_activities;
use crate::services::details::{activity_details, ActivityDetails};
use crate::services::filters::{filter_activities_by_waypoint_substring, filter_activities_by_year};
use crate::services::Language;
use crate::time_utils::parse_activity_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/{id}", put(update_activity))
        .route("/api/activities/{id}/details", get(get_details))
        .route("/api/grades/{category}", get(get_grade_options))
}

// ─── Table ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ActivitiesParams {
    /// Literal substring of the comma-joined waypoint list
    pub waypoint: Option<String>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub lang: Option<Language>,
}

impl ActivitiesParams {
    /// Keep the rows passing the waypoint and year filters, in input order.
    pub(crate) fn filter<T>(&self, rows: &[T]) -> Result<Vec<T>>
    where
        T: AsRef<Activity> + Clone,
    {
        filter_table(rows, self.waypoint.as_deref(), self.from_year, self.to_year)
    }
}

/// Waypoint substring and year filters shared by the table and the charts.
pub(crate) fn filter_table<T>(
    rows: &[T],
    waypoint: Option<&str>,
    from_year: Option<i32>,
    to_year: Option<i32>,
) -> Result<Vec<T>>
where
    T: AsRef<Activity> + Clone,
{
    let years = year_range(from_year, to_year)?;
    let rows = filter_activities_by_waypoint_substring(rows, waypoint);
    Ok(match years {
        Some(years) => filter_activities_by_year(&rows, years),
        None => rows,
    })
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    /// Newest first
    pub activities: Vec<DerivedActivity>,
    pub count: usize,
    /// Sum of days, rounded up
    pub total_days: u64,
}

/// Apply the table filters and sort newest first.
pub(crate) fn select_activities(
    rows: &[DerivedActivity],
    params: &ActivitiesParams,
) -> Result<Vec<DerivedActivity>> {
    let mut rows = params.filter(rows)?;
    rows.sort_by(|a, b| {
        b.activity
            .date
            .cmp(&a.activity.date)
            .then_with(|| b.activity.id.cmp(&a.activity.id))
    });
    Ok(rows)
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesParams>,
) -> Result<Json<ActivitiesResponse>> {
    let activities = state.dataset.activities().await;
    let rows = derive_activities(&activities, &state.metadata, state.language(params.lang));
    let rows = select_activities(&rows, &params)?;

    Ok(Json(ActivitiesResponse {
        count: rows.len(),
        total_days: total_days_badge(&rows),
        activities: rows,
    }))
}

// ─── Create / Edit ───────────────────────────────────────────

/// Body of the activity form, shared by create and edit.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_activity_request"))]
pub struct ActivityRequest {
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    pub category: ActivityCategory,
    #[serde(default)]
    pub grade: String,
    pub date: String,
    #[validate(range(exclusive_min = 0.0, max = 365.0))]
    pub days: f64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub context: Option<Context>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub waypoints: Vec<String>,
    pub participants: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub topo: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub comments: Option<String>,
}

/// Blank form fields arrive as empty strings; treat them as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(T::from))
}

fn unknown_code(kind: &'static str, code: &str) -> ValidationError {
    ValidationError::new(kind).with_message(format!("unknown {}: {}", kind, code).into())
}

fn validate_activity_request(req: &ActivityRequest) -> std::result::Result<(), ValidationError> {
    if let ActivityCategory::Other(code) = &req.category {
        return Err(unknown_code("category", code));
    }
    if let Some(Context::Other(code)) = &req.context {
        return Err(unknown_code("context", code));
    }
    if let Some(Role::Other(code)) = &req.role {
        return Err(unknown_code("role", code));
    }
    if parse_activity_date(&req.date).is_none() {
        return Err(ValidationError::new("date")
            .with_message(format!("not an ISO date: {}", req.date).into()));
    }
    if req.waypoints.iter().any(|w| w.trim().is_empty()) {
        return Err(ValidationError::new("waypoints")
            .with_message("waypoint names must not be blank".into()));
    }
    Ok(())
}

impl ActivityRequest {
    fn into_activity(self, id: u64) -> Activity {
        Activity {
            id,
            label: self.label,
            category: self.category,
            grade: self.grade,
            date: self.date.trim().to_string(),
            days: self.days,
            context: self.context,
            role: self.role,
            waypoints: self.waypoints,
            participants: self.participants,
            topo: self.topo,
            comments: self.comments,
        }
    }
}

/// Log waypoint names that match no stored place. They are kept; the join
/// drops them later.
async fn warn_unknown_waypoints(state: &AppState, activity: &Activity) {
    let places = state.dataset.places().await;
    let unknown: Vec<&str> = activity
        .waypoints
        .iter()
        .filter(|w| !places.iter().any(|p| &p.waypoint == *w))
        .map(String::as_str)
        .collect();

    if !unknown.is_empty() {
        tracing::warn!(
            id = activity.id,
            unknown = ?unknown,
            "Activity references unknown places"
        );
    }
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    req.validate()?;

    let activity = state.dataset.create_activity(req.into_activity(0)).await?;
    warn_unknown_waypoints(&state, &activity).await;

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<ActivityRequest>,
) -> Result<Json<Activity>> {
    req.validate()?;

    let activity = state.dataset.update_activity(req.into_activity(id)).await?;
    warn_unknown_waypoints(&state, &activity).await;

    Ok(Json(activity))
}

// ─── Details ─────────────────────────────────────────────────

async fn get_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ActivityDetails>> {
    let data = state.dataset.snapshot().await;
    let activity = data
        .activities
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;

    Ok(Json(activity_details(activity, &data.places, &state.metadata)))
}

// ─── Grades ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GradeOptionsResponse {
    pub category: String,
    /// Easiest first
    pub grades: Vec<String>,
}

async fn get_grade_options(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<GradeOptionsResponse> {
    let grades = state
        .metadata
        .grade_options(&ActivityCategory::from(category.as_str()));
    Json(GradeOptionsResponse { category, grades })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ActivityRequest {
        ActivityRequest {
            label: "Dent Parrachée".to_string(),
            category: ActivityCategory::Ski,
            grade: "3.2".to_string(),
            date: "2023-04-02".to_string(),
            days: 1.0,
            context: Some(Context::Friends),
            role: None,
            waypoints: vec!["Dent Parrachée".to_string()],
            participants: Some(3),
            topo: Some("https://www.camptocamp.org/routes/42".to_string()),
            comments: None,
        }
    }

    #[test]
    fn test_valid_activity() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut zero_days = request();
        zero_days.days = 0.0;
        assert!(zero_days.validate().is_err());

        let mut bad_date = request();
        bad_date.date = "02/04/2023".to_string();
        assert!(bad_date.validate().is_err());

        let mut bad_role = request();
        bad_role.role = Some(Role::Other("boss".to_string()));
        assert!(bad_role.validate().is_err());

        let mut bad_topo = request();
        bad_topo.topo = Some("not a url".to_string());
        assert!(bad_topo.validate().is_err());

        let mut no_label = request();
        no_label.label = String::new();
        assert!(no_label.validate().is_err());
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let req: ActivityRequest = serde_json::from_value(serde_json::json!({
            "label": "Pointe Percée",
            "category": "hike",
            "date": "2022-09-10",
            "days": 1,
            "context": "",
            "role": "  ",
            "topo": "",
            "comments": ""
        }))
        .unwrap();

        assert_eq!(req.context, None);
        assert_eq!(req.role, None);
        assert_eq!(req.topo, None);
        assert_eq!(req.comments, None);
        assert!(req.waypoints.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_into_activity_uses_given_id() {
        let activity = request().into_activity(12);
        assert_eq!(activity.id, 12);
        assert_eq!(activity.waypoints, vec!["Dent Parrachée"]);
    }
}
