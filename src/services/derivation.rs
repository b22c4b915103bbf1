// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived columns and the place/activity join.
//!
//! Everything here is pure and recomputed on every request.

use crate::models::{Activity, DerivedActivity, GradeRank, Metadata, Place, VisitRow};
use crate::services::translation::{translate_labels, Language};
use std::collections::HashMap;

impl From<Activity> for DerivedActivity {
    fn from(activity: Activity) -> Self {
        let grade_num = GradeRank::Raw(activity.grade.clone());
        Self {
            activity,
            year: None,
            grade_num,
            category_translated: None,
            context_translated: None,
            role_translated: None,
        }
    }
}

/// Year from the first dash-separated segment of an ISO date.
pub fn extract_year(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

/// Rank of the activity's grade, or the raw grade if the scale has no entry.
pub fn grade_rank(activity: &Activity, metadata: &Metadata) -> GradeRank {
    match metadata.grade_rank(&activity.category, &activity.grade) {
        Some(rank) => GradeRank::Rank(rank),
        None => GradeRank::Raw(activity.grade.clone()),
    }
}

/// Overwrite `year` and `grade_num` from the stored fields.
///
/// Only reads stored fields, so running it again changes nothing.
pub fn derive_activity_fields(rows: &mut [DerivedActivity], metadata: &Metadata) {
    for row in rows.iter_mut() {
        row.year = extract_year(&row.activity.date);
        row.grade_num = grade_rank(&row.activity, metadata);
    }
}

/// Full derivation: derived columns plus labels for `lang`.
pub fn derive_activities(
    activities: &[Activity],
    metadata: &Metadata,
    lang: Language,
) -> Vec<DerivedActivity> {
    let mut rows: Vec<DerivedActivity> = activities
        .iter()
        .cloned()
        .map(DerivedActivity::from)
        .collect();
    derive_activity_fields(&mut rows, metadata);
    translate_labels(&mut rows, lang);
    rows
}

/// One row per (activity, waypoint) whose waypoint is a known place.
///
/// Unknown waypoint names are dropped.
pub fn explode_waypoints(activities: &[Activity], places: &[Place]) -> Vec<VisitRow> {
    let by_name: HashMap<&str, &Place> = places
        .iter()
        .map(|place| (place.waypoint.as_str(), place))
        .collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for activity in activities {
        let year = extract_year(&activity.date);
        for name in &activity.waypoints {
            let Some(place) = by_name.get(name.as_str()) else {
                dropped += 1;
                continue;
            };
            rows.push(VisitRow {
                activity_id: activity.id,
                date: activity.date.clone(),
                waypoint: place.waypoint.clone(),
                year,
                category: place.category.clone(),
                altitude: place.altitude,
                latitude: place.latitude,
                longitude: place.longitude,
            });
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, joined = rows.len(), "Dropped unknown waypoint references");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCategory, PlaceCategory};

    fn metadata() -> Metadata {
        Metadata::load_from_yaml("activity:\n  climbing:\n    grades: {'5c': 12, '6a': 14}\n")
            .unwrap()
    }

    fn activity(id: u64, date: &str, grade: &str, waypoints: &[&str]) -> Activity {
        Activity {
            id,
            label: format!("Outing {}", id),
            category: ActivityCategory::Climbing,
            grade: grade.to_string(),
            date: date.to_string(),
            days: 1.0,
            context: None,
            role: None,
            waypoints: waypoints.iter().map(|w| w.to_string()).collect(),
            participants: None,
            topo: None,
            comments: None,
        }
    }

    fn place(name: &str, altitude: i32) -> Place {
        Place {
            waypoint: name.to_string(),
            latitude: 46.0,
            longitude: 7.0,
            altitude,
            category: PlaceCategory::Cliff,
        }
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2021-03-04"), Some(2021));
        assert_eq!(extract_year("2021-03-04T00:00:00.000"), Some(2021));
        assert_eq!(extract_year("sometime"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn test_grade_num_uses_scale_or_raw_grade() {
        let mut rows: Vec<DerivedActivity> = vec![
            activity(0, "2020-05-01", "6a", &[]).into(),
            activity(1, "2020-05-02", "9z", &[]).into(),
        ];
        derive_activity_fields(&mut rows, &metadata());

        assert_eq!(rows[0].grade_num, GradeRank::Rank(14));
        assert_eq!(rows[1].grade_num, GradeRank::Raw("9z".to_string()));
        assert_eq!(rows[0].year, Some(2020));
    }

    #[test]
    fn test_derive_is_idempotent() {
        let metadata = metadata();
        let mut once: Vec<DerivedActivity> = vec![
            activity(0, "2019-01-01", "5c", &["A"]).into(),
            activity(1, "bad-date", "??", &[]).into(),
        ];
        derive_activity_fields(&mut once, &metadata);

        let mut twice = once.clone();
        derive_activity_fields(&mut twice, &metadata);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_explode_skips_activities_without_waypoints() {
        let rows = explode_waypoints(&[activity(0, "2020-01-01", "5c", &[])], &[place("A", 1000)]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_explode_drops_unknown_waypoints() {
        let activities = vec![activity(4, "2020-01-01", "5c", &["A", "B"])];
        let rows = explode_waypoints(&activities, &[place("A", 1000)]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].waypoint, "A");
        assert_eq!(rows[0].activity_id, 4);
        assert_eq!(rows[0].year, Some(2020));
        assert_eq!(rows[0].altitude, 1000);
    }

    #[test]
    fn test_dropped_waypoints_are_logged_as_warning() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let activities = vec![activity(0, "2020-01-01", "5c", &["A", "Nowhere"])];
        tracing::subscriber::with_default(subscriber, || {
            explode_waypoints(&activities, &[place("A", 1000)]);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Dropped unknown waypoint references"));
        assert!(output.contains("dropped=1"));
    }

    #[test]
    fn test_explode_keeps_activity_and_waypoint_order() {
        let activities = vec![
            activity(0, "2020-01-01", "5c", &["B", "A"]),
            activity(1, "2021-01-01", "5c", &["A"]),
        ];
        let rows = explode_waypoints(&activities, &[place("A", 1000), place("B", 2000)]);

        let names: Vec<(&str, Option<i32>)> =
            rows.iter().map(|r| (r.waypoint.as_str(), r.year)).collect();
        assert_eq!(
            names,
            vec![("B", Some(2020)), ("A", Some(2020)), ("A", Some(2021))]
        );
    }
}
