// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Separator used when the waypoint list is stored as a single string.
pub const WAYPOINT_SEPARATOR: &str = ", ";

/// Implements the string-code conversions shared by the activity enums.
///
/// Each enum carries an `Other` variant for codes that are not known, so
/// parsing is total.
macro_rules! coded_enum {
    ($name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every known value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Storage code for this value.
            pub fn code(&self) -> &str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Other(code) => code,
                }
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                match code.as_str() {
                    $($code => $name::$variant,)+
                    _ => $name::Other(code),
                }
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                $name::from(code.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(code) => code,
                    known => known.code().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

coded_enum!(ActivityCategory {
    Ski => "ski",
    Mountaineering => "mountaineering",
    Hike => "hike",
    Bike => "bike",
    ViaFerrata => "via_ferrata",
    Climbing => "climbing",
    Canoe => "canoe",
});

coded_enum!(Context {
    AlpineClub => "alpine_club",
    WithGuide => "with_guide",
    Solo => "solo",
    Family => "family",
    Friends => "friends",
});

coded_enum!(Role {
    Lead => "lead",
    First => "first",
    Switch => "switch",
    Second => "second",
    Participant => "participant",
});

/// Stored activity record in `activities.json`.
///
/// Field order matches the persisted column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Identity, assigned as max existing id + 1
    pub id: u64,
    pub label: String,
    pub category: ActivityCategory,
    /// Grade on the category's own scale (e.g. "PD+", "T3")
    #[serde(default, deserialize_with = "string_or_null")]
    pub grade: String,
    /// ISO 8601 date; empty when the stored date is missing
    #[serde(
        default,
        deserialize_with = "string_or_null",
        serialize_with = "empty_as_null"
    )]
    pub date: String,
    /// Number of days, possibly fractional
    pub days: f64,
    pub context: Option<Context>,
    pub role: Option<Role>,
    /// Visited places, stored as a comma-joined string
    #[serde(default, with = "waypoint_list")]
    pub waypoints: Vec<String>,
    #[serde(default, deserialize_with = "optional_count")]
    pub participants: Option<u32>,
    pub topo: Option<String>,
    pub comments: Option<String>,
}

impl Activity {
    /// Waypoint list in its stored, comma-joined form.
    pub fn waypoints_joined(&self) -> String {
        self.waypoints.join(WAYPOINT_SEPARATOR)
    }
}

/// Split a stored waypoint string into names. Blank input yields no names.
pub fn split_waypoints(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(WAYPOINT_SEPARATOR).map(String::from).collect()
}

/// Serde adapter between `Vec<String>` and the comma-joined storage form.
pub mod waypoint_list {
    use super::{split_waypoints, WAYPOINT_SEPARATOR};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(waypoints: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        if waypoints.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&waypoints.join(WAYPOINT_SEPARATOR))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(split_waypoints).unwrap_or_default())
    }
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_null<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}

/// Accept integral counts written either as integers or as floats (`3.0`).
fn optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => {
            Ok(Some(n as u32))
        }
        Some(n) => Err(serde::de::Error::custom(format!(
            "participants must be a non-negative integer, got {}",
            n
        ))),
    }
}
