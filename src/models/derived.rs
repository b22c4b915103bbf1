// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived rows computed from stored records. Never persisted.

use crate::models::{Activity, PlaceCategory};
use serde::Serialize;
use std::fmt;

/// Numeric grade rank, or the raw grade when the scale has no mapping for it.
///
/// The two variants share one column in the activity table; consumers that
/// sort by grade must handle both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GradeRank {
    Rank(i64),
    Raw(String),
}

impl fmt::Display for GradeRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeRank::Rank(rank) => write!(f, "{}", rank),
            GradeRank::Raw(grade) => f.write_str(grade),
        }
    }
}

/// Activity plus the fields the views need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    /// Year from the date, `None` when the date is unparsable
    pub year: Option<i32>,
    pub grade_num: GradeRank,
    pub category_translated: Option<String>,
    pub context_translated: Option<String>,
    pub role_translated: Option<String>,
}

impl AsRef<Activity> for Activity {
    fn as_ref(&self) -> &Activity {
        self
    }
}

impl AsRef<Activity> for DerivedActivity {
    fn as_ref(&self) -> &Activity {
        &self.activity
    }
}

/// One (activity, waypoint) pair joined with the matching place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRow {
    pub activity_id: u64,
    pub date: String,
    pub waypoint: String,
    pub year: Option<i32>,
    pub category: PlaceCategory,
    pub altitude: i32,
    pub latitude: f64,
    pub longitude: f64,
}
