// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-selected filters applied to places, activities and visits.

use crate::models::{Activity, Place, PlaceCategory, VisitRow};
use crate::services::derivation::extract_year;
use serde::Serialize;

/// What an empty category selection means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilterPolicy {
    /// Empty selection means "no category filter" (map view).
    #[default]
    IgnoreWhenEmpty,
    /// Empty selection keeps nothing (chart filters).
    Literal,
}

impl CategoryFilterPolicy {
    /// Whether `category` passes a filter on `selected`.
    pub fn admits(self, selected: &[PlaceCategory], category: &PlaceCategory) -> bool {
        match self {
            CategoryFilterPolicy::IgnoreWhenEmpty if selected.is_empty() => true,
            _ => selected.contains(category),
        }
    }
}

/// Inclusive altitude bounds in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AltitudeRange {
    pub min: i32,
    pub max: i32,
}

impl AltitudeRange {
    /// Range admitting every altitude.
    pub const ANY: AltitudeRange = AltitudeRange {
        min: i32::MIN,
        max: i32::MAX,
    };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, altitude: i32) -> bool {
        (self.min..=self.max).contains(&altitude)
    }

    /// Smallest range covering all `places`, `None` when there are none.
    pub fn spanning(places: &[Place]) -> Option<Self> {
        let min = places.iter().map(|p| p.altitude).min()?;
        let max = places.iter().map(|p| p.altitude).max()?;
        Some(Self { min, max })
    }
}

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

/// Places within `altitude` whose category passes the selection.
pub fn filter_places(
    places: &[Place],
    altitude: AltitudeRange,
    categories: &[PlaceCategory],
    policy: CategoryFilterPolicy,
) -> Vec<Place> {
    places
        .iter()
        .filter(|p| altitude.contains(p.altitude) && policy.admits(categories, &p.category))
        .cloned()
        .collect()
}

/// Result of a place search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub places: Vec<Place>,
    /// Exactly one place matched; the map should zoom onto it.
    pub zoom_in: bool,
}

/// Restrict to the selected place names. No selection keeps everything.
pub fn filter_by_search(places: Vec<Place>, selected: Option<&[String]>) -> SearchResult {
    let places = match selected {
        Some(names) if !names.is_empty() => places
            .into_iter()
            .filter(|p| names.contains(&p.waypoint))
            .collect(),
        _ => places,
    };

    SearchResult {
        zoom_in: selected.is_some_and(|names| !names.is_empty()) && places.len() == 1,
        places,
    }
}

/// Activities whose stored waypoint string contains `substring` literally.
///
/// Matching is case-sensitive. A missing or empty substring keeps everything.
pub fn filter_activities_by_waypoint_substring<T>(rows: &[T], substring: Option<&str>) -> Vec<T>
where
    T: AsRef<Activity> + Clone,
{
    match substring.filter(|s| !s.is_empty()) {
        Some(needle) => rows
            .iter()
            .filter(|row| row.as_ref().waypoints_joined().contains(needle))
            .cloned()
            .collect(),
        None => rows.to_vec(),
    }
}

/// Activities dated within `years`. Undated activities are excluded.
pub fn filter_activities_by_year<T>(rows: &[T], years: YearRange) -> Vec<T>
where
    T: AsRef<Activity> + Clone,
{
    rows.iter()
        .filter(|row| {
            extract_year(&row.as_ref().date).is_some_and(|y| (years.from..=years.to).contains(&y))
        })
        .cloned()
        .collect()
}

/// Visit rows within `altitude` whose place category passes the selection.
pub fn filter_visits(
    rows: &[VisitRow],
    altitude: AltitudeRange,
    categories: &[PlaceCategory],
    policy: CategoryFilterPolicy,
) -> Vec<VisitRow> {
    rows.iter()
        .filter(|r| altitude.contains(r.altitude) && policy.admits(categories, &r.category))
        .cloned()
        .collect()
}
