// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregates behind the statistics views.
//!
//! Rows without a parsable year are left out of every per-year table.

use crate::models::{
    Activity, ActivityCategory, Context, DerivedActivity, GradeRank, Place, PlaceCategory, Role,
    VisitRow,
};
use crate::services::translation::Language;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// `table[year][key] = value`
pub type YearTable<K, V> = BTreeMap<i32, BTreeMap<K, V>>;

/// Grade excluded from the ski progression (resort skiing).
const SKI_PISTE_GRADE: &str = "Piste";

/// Categories that get a grade progression chart, in display order.
pub const GRADED_CATEGORIES: [ActivityCategory; 4] = [
    ActivityCategory::Mountaineering,
    ActivityCategory::Hike,
    ActivityCategory::Climbing,
    ActivityCategory::Ski,
];

/// Grouping label for an activity: the translated category, or the raw code.
pub fn category_key(row: &DerivedActivity) -> String {
    row.category_translated
        .clone()
        .unwrap_or_else(|| row.activity.category.code().to_string())
}

/// Total days per (year, translated category).
pub fn sum_days_by_year_and_category(rows: &[DerivedActivity]) -> YearTable<String, f64> {
    let mut table: YearTable<String, f64> = BTreeMap::new();
    for row in rows {
        let Some(year) = row.year else { continue };
        *table
            .entry(year)
            .or_default()
            .entry(category_key(row))
            .or_insert(0.0) += row.activity.days;
    }
    table
}

/// Total days per year over all categories.
pub fn days_by_year(rows: &[DerivedActivity]) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        if let Some(year) = row.year {
            *totals.entry(year).or_insert(0.0) += row.activity.days;
        }
    }
    totals
}

/// Total days for the summary badge, rounded up.
pub fn total_days_badge<T: AsRef<Activity>>(rows: &[T]) -> u64 {
    let total: f64 = rows.iter().map(|r| r.as_ref().days).sum();
    total.max(0.0).ceil() as u64
}

/// Running total of days per category, by ascending year.
///
/// Each category is an independent series containing only the years in
/// which it appears.
pub fn cumulative_days_by_category(table: &YearTable<String, f64>) -> BTreeMap<String, BTreeMap<i32, f64>> {
    let mut running: HashMap<&str, f64> = HashMap::new();
    let mut series: BTreeMap<String, BTreeMap<i32, f64>> = BTreeMap::new();

    for (year, categories) in table {
        for (category, days) in categories {
            let total = running.entry(category.as_str()).or_insert(0.0);
            *total += days;
            series
                .entry(category.clone())
                .or_default()
                .insert(*year, *total);
        }
    }
    series
}

/// Number of visits per (year, place category).
pub fn count_waypoints_by_year_and_category(rows: &[VisitRow]) -> YearTable<PlaceCategory, usize> {
    let mut table: YearTable<PlaceCategory, usize> = BTreeMap::new();
    for row in rows {
        let Some(year) = row.year else { continue };
        *table
            .entry(year)
            .or_default()
            .entry(row.category.clone())
            .or_insert(0) += 1;
    }
    table
}

/// Number of places per category.
pub fn count_places_by_category(places: &[Place]) -> BTreeMap<PlaceCategory, usize> {
    let mut counts = BTreeMap::new();
    for place in places {
        *counts.entry(place.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Lowest and highest place of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltitudeExtremes {
    pub lowest: Place,
    pub highest: Place,
}

/// Lowest and highest place per category; ties go to the first encountered.
pub fn min_max_altitude_by_category(places: &[Place]) -> BTreeMap<PlaceCategory, AltitudeExtremes> {
    let mut extremes: BTreeMap<PlaceCategory, AltitudeExtremes> = BTreeMap::new();
    for place in places {
        match extremes.get_mut(&place.category) {
            Some(current) => {
                if place.altitude < current.lowest.altitude {
                    current.lowest = place.clone();
                }
                if place.altitude > current.highest.altitude {
                    current.highest = place.clone();
                }
            }
            None => {
                extremes.insert(
                    place.category.clone(),
                    AltitudeExtremes {
                        lowest: place.clone(),
                        highest: place.clone(),
                    },
                );
            }
        }
    }
    extremes
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostVisited {
    pub waypoint: String,
    pub visits: usize,
}

/// Most visited waypoint per category; ties go to the first encountered.
pub fn most_visited_by_category(rows: &[VisitRow]) -> BTreeMap<PlaceCategory, MostVisited> {
    // (category, waypoint) -> (visits, first row index)
    let mut counts: HashMap<(&PlaceCategory, &str), (usize, usize)> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        counts
            .entry((&row.category, row.waypoint.as_str()))
            .or_insert((0, index))
            .0 += 1;
    }

    let mut best: BTreeMap<PlaceCategory, (usize, usize, &str)> = BTreeMap::new();
    for ((category, waypoint), (visits, first)) in counts {
        let candidate = (visits, first, waypoint);
        match best.get_mut(category) {
            Some(current) => {
                let better = visits > current.0 || (visits == current.0 && first < current.1);
                if better {
                    *current = candidate;
                }
            }
            None => {
                best.insert(category.clone(), candidate);
            }
        }
    }

    best.into_iter()
        .map(|(category, (visits, _, waypoint))| {
            (
                category,
                MostVisited {
                    waypoint: waypoint.to_string(),
                    visits,
                },
            )
        })
        .collect()
}

/// Who led the outing, as shown on the context chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    SoloOrUnknown,
    GuidedOrSecond,
    Switch,
    LeadOrFirst,
}

impl Situation {
    /// Stacking order on the chart.
    pub const ALL: [Situation; 4] = [
        Situation::SoloOrUnknown,
        Situation::GuidedOrSecond,
        Situation::Switch,
        Situation::LeadOrFirst,
    ];

    pub fn classify(context: Option<&Context>, role: Option<&Role>) -> Self {
        if matches!(context, Some(Context::WithGuide))
            || matches!(role, Some(Role::Second | Role::Participant))
        {
            Situation::GuidedOrSecond
        } else if matches!(role, Some(Role::Lead | Role::First)) {
            Situation::LeadOrFirst
        } else if matches!(role, Some(Role::Switch)) {
            Situation::Switch
        } else {
            Situation::SoloOrUnknown
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Situation::SoloOrUnknown, _) => "Solo & N/A",
            (Situation::GuidedOrSecond, Language::Fr) => "Encadré & Second",
            (Situation::GuidedOrSecond, Language::En) => "Guided & second",
            (Situation::Switch, Language::Fr) => "Réversible",
            (Situation::Switch, Language::En) => "Switch",
            (Situation::LeadOrFirst, Language::Fr) => "Encadrant & Premier",
            (Situation::LeadOrFirst, Language::En) => "Lead & first",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Situation::SoloOrUnknown => "blue",
            Situation::GuidedOrSecond => "orangered",
            Situation::Switch => "darkorchid",
            Situation::LeadOrFirst => "forestgreen",
        }
    }
}

/// Total days per (year, situation).
pub fn days_by_year_and_situation(rows: &[DerivedActivity]) -> YearTable<Situation, f64> {
    let mut table: YearTable<Situation, f64> = BTreeMap::new();
    for row in rows {
        let Some(year) = row.year else { continue };
        let situation =
            Situation::classify(row.activity.context.as_ref(), row.activity.role.as_ref());
        *table
            .entry(year)
            .or_default()
            .entry(situation)
            .or_insert(0.0) += row.activity.days;
    }
    table
}

/// Ordering for mixed grade columns: ranked grades first by rank, then raw
/// grades alphabetically.
pub fn compare_grades(a: &GradeRank, b: &GradeRank) -> Ordering {
    match (a, b) {
        (GradeRank::Rank(x), GradeRank::Rank(y)) => x.cmp(y),
        (GradeRank::Rank(_), GradeRank::Raw(_)) => Ordering::Less,
        (GradeRank::Raw(_), GradeRank::Rank(_)) => Ordering::Greater,
        (GradeRank::Raw(x), GradeRank::Raw(y)) => x.cmp(y),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradePoint {
    pub date: String,
    pub grade: String,
    pub grade_num: GradeRank,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeCount {
    pub grade: String,
    pub count: usize,
}

/// Grade history for one activity category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeProgression {
    pub category: ActivityCategory,
    /// Outings sorted by grade
    pub points: Vec<GradePoint>,
    /// Outings per grade, in grade order
    pub counts: Vec<GradeCount>,
    pub total: usize,
}

/// Grade progression for each graded category. Resort ski days are skipped.
pub fn grade_progression(rows: &[DerivedActivity]) -> Vec<GradeProgression> {
    GRADED_CATEGORIES
        .iter()
        .map(|category| {
            let mut selected: Vec<&DerivedActivity> = rows
                .iter()
                .filter(|r| &r.activity.category == category)
                .filter(|r| !(category == &ActivityCategory::Ski && r.activity.grade == SKI_PISTE_GRADE))
                .collect();
            selected.sort_by(|a, b| compare_grades(&a.grade_num, &b.grade_num));

            let mut counts: Vec<GradeCount> = Vec::new();
            for row in &selected {
                match counts.last_mut() {
                    Some(last) if last.grade == row.activity.grade => last.count += 1,
                    _ => counts.push(GradeCount {
                        grade: row.activity.grade.clone(),
                        count: 1,
                    }),
                }
            }

            let points: Vec<GradePoint> = selected
                .iter()
                .map(|r| GradePoint {
                    date: r.activity.date.clone(),
                    grade: r.activity.grade.clone(),
                    grade_num: r.grade_num.clone(),
                    label: r.activity.label.clone(),
                })
                .collect();

            GradeProgression {
                category: category.clone(),
                total: points.len(),
                points,
                counts,
            }
        })
        .collect()
}
