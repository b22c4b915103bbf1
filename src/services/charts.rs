// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chart series handed to the frontend.
//!
//! A series is a named, colored list of points. The frontend renders them
//! as-is and never sends anything back.

use crate::models::{ActivityCategory, DerivedActivity, Metadata, Place, PlaceCategory, VisitRow};
use crate::services::aggregation::{self, category_key, Situation};
use crate::services::filters::{filter_places, filter_visits, AltitudeRange, CategoryFilterPolicy};
use crate::services::translation::{place_category_label, Language};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point<X, Y> {
    pub x: X,
    pub y: Y,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<X, Y> {
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<Point<X, Y>>,
}

fn place_series_name(category: &PlaceCategory, lang: Language) -> String {
    place_category_label(category, lang)
        .map(String::from)
        .unwrap_or_else(|| category.code().to_string())
}

/// Color of each activity category label present in `rows`.
fn activity_colors<'a>(
    rows: &'a [DerivedActivity],
    metadata: &'a Metadata,
) -> HashMap<String, Option<&'a str>> {
    let mut categories: HashMap<String, &ActivityCategory> = HashMap::new();
    for row in rows {
        categories
            .entry(category_key(row))
            .or_insert(&row.activity.category);
    }
    categories
        .into_iter()
        .map(|(label, category)| (label, metadata.activity_color(category)))
        .collect()
}

/// Pivot a year table into one series per key.
fn pivot<K: Ord + Clone, Y: Copy>(table: &aggregation::YearTable<K, Y>) -> BTreeMap<K, Vec<Point<i32, Y>>> {
    let mut series: BTreeMap<K, Vec<Point<i32, Y>>> = BTreeMap::new();
    for (year, values) in table {
        for (key, value) in values {
            series.entry(key.clone()).or_default().push(Point {
                x: *year,
                y: *value,
                text: None,
            });
        }
    }
    series
}

/// Stacked bars: days per year, one series per activity category.
pub fn days_by_year_series(rows: &[DerivedActivity], metadata: &Metadata) -> Vec<Series<i32, f64>> {
    let colors = activity_colors(rows, metadata);
    pivot(&aggregation::sum_days_by_year_and_category(rows))
        .into_iter()
        .map(|(name, points)| Series {
            color: colors.get(&name).copied().flatten().map(String::from),
            name,
            points,
        })
        .collect()
}

/// Lines: cumulative days per activity category.
pub fn cumulative_days_series(rows: &[DerivedActivity], metadata: &Metadata) -> Vec<Series<i32, f64>> {
    let colors = activity_colors(rows, metadata);
    let table = aggregation::sum_days_by_year_and_category(rows);
    aggregation::cumulative_days_by_category(&table)
        .into_iter()
        .map(|(name, years)| Series {
            color: colors.get(&name).copied().flatten().map(String::from),
            points: years
                .into_iter()
                .map(|(x, y)| Point { x, y, text: None })
                .collect(),
            name,
        })
        .collect()
}

/// Stacked bars: visited places per year, one series per place category.
pub fn waypoints_by_year_series(
    visits: &[VisitRow],
    metadata: &Metadata,
    lang: Language,
) -> Vec<Series<i32, usize>> {
    pivot(&aggregation::count_waypoints_by_year_and_category(visits))
        .into_iter()
        .map(|(category, points)| Series {
            name: place_series_name(&category, lang),
            color: metadata.place_color(&category).map(String::from),
            points,
        })
        .collect()
}

/// Stacked bars: days per year by who led the outing.
///
/// Every situation gets a series, even when empty, so the legend is stable.
pub fn situation_series(rows: &[DerivedActivity], lang: Language) -> Vec<Series<i32, f64>> {
    let mut by_situation = pivot(&aggregation::days_by_year_and_situation(rows));
    Situation::ALL
        .iter()
        .map(|situation| Series {
            name: situation.label(lang).to_string(),
            color: Some(situation.color().to_string()),
            points: by_situation.remove(situation).unwrap_or_default(),
        })
        .collect()
}

/// Scatter: filtered places sorted by altitude, x is the rank.
pub fn waypoints_by_altitude_series(
    places: &[Place],
    altitude: AltitudeRange,
    categories: &[PlaceCategory],
    metadata: &Metadata,
    lang: Language,
) -> Vec<Series<usize, i32>> {
    let mut selected = filter_places(places, altitude, categories, CategoryFilterPolicy::Literal);
    selected.sort_by_key(|p| p.altitude);

    let mut series: BTreeMap<PlaceCategory, Vec<Point<usize, i32>>> = BTreeMap::new();
    for (index, place) in selected.into_iter().enumerate() {
        series.entry(place.category.clone()).or_default().push(Point {
            x: index,
            y: place.altitude,
            text: Some(place.waypoint),
        });
    }

    series
        .into_iter()
        .map(|(category, points)| Series {
            name: place_series_name(&category, lang),
            color: metadata.place_color(&category).map(String::from),
            points,
        })
        .collect()
}

/// Scatter: filtered visits over time, y is the altitude.
pub fn visits_over_time_series(
    visits: &[VisitRow],
    altitude: AltitudeRange,
    categories: &[PlaceCategory],
    metadata: &Metadata,
    lang: Language,
) -> Vec<Series<String, i32>> {
    let selected = filter_visits(visits, altitude, categories, CategoryFilterPolicy::Literal);

    let mut series: BTreeMap<PlaceCategory, Vec<Point<String, i32>>> = BTreeMap::new();
    for visit in selected {
        series.entry(visit.category.clone()).or_default().push(Point {
            x: visit.date,
            y: visit.altitude,
            text: Some(visit.waypoint),
        });
    }

    series
        .into_iter()
        .map(|(category, points)| Series {
            name: place_series_name(&category, lang),
            color: metadata.place_color(&category).map(String::from),
            points,
        })
        .collect()
}
