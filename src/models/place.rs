// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place model: a named waypoint with coordinates and altitude.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of waypoint.
///
/// Unknown codes found in legacy data are kept as `Other` so that a single
/// odd record never prevents the collection from loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlaceCategory {
    Summit,
    Pass,
    Hut,
    Poi,
    Cliff,
    Other(String),
}

impl PlaceCategory {
    /// Every known category, in display order.
    pub const ALL: [PlaceCategory; 5] = [
        PlaceCategory::Summit,
        PlaceCategory::Pass,
        PlaceCategory::Hut,
        PlaceCategory::Poi,
        PlaceCategory::Cliff,
    ];

    /// Storage code for this category.
    pub fn code(&self) -> &str {
        match self {
            PlaceCategory::Summit => "summit",
            PlaceCategory::Pass => "pass",
            PlaceCategory::Hut => "hut",
            PlaceCategory::Poi => "POI",
            PlaceCategory::Cliff => "cliff",
            PlaceCategory::Other(code) => code,
        }
    }
}

impl From<String> for PlaceCategory {
    fn from(code: String) -> Self {
        match code.as_str() {
            "summit" => PlaceCategory::Summit,
            "pass" => PlaceCategory::Pass,
            "hut" => PlaceCategory::Hut,
            "POI" => PlaceCategory::Poi,
            "cliff" => PlaceCategory::Cliff,
            _ => PlaceCategory::Other(code),
        }
    }
}

impl From<&str> for PlaceCategory {
    fn from(code: &str) -> Self {
        PlaceCategory::from(code.to_string())
    }
}

impl From<PlaceCategory> for String {
    fn from(category: PlaceCategory) -> Self {
        match category {
            PlaceCategory::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A visited place, stored in `places.json`.
///
/// Field order matches the persisted column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Waypoint name (identity, unique within the collection)
    pub waypoint: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters
    #[serde(deserialize_with = "whole_meters")]
    pub altitude: i32,
    pub category: PlaceCategory,
}

/// Accept altitudes written as integers or as integral floats (`4808.0`).
fn whole_meters<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() && raw.fract() == 0.0 && raw >= i32::MIN as f64 && raw <= i32::MAX as f64 {
        Ok(raw as i32)
    } else {
        Err(serde::de::Error::custom(format!(
            "altitude must be a whole number of meters, got {}",
            raw
        )))
    }
}
