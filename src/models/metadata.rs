// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static metadata: grade scales, icons and colors.
//!
//! Loaded once at startup from `settings/metadata.yaml` and never mutated.

use crate::models::{ActivityCategory, PlaceCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Grade label offered when a category has no grade scale.
pub const NO_GRADE: &str = "N/A";

/// Ordinal grade scale for one activity category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradeScale {
    /// Grade label -> rank (higher is harder)
    #[serde(default)]
    pub grades: HashMap<String, i64>,
}

/// Read-only configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Grade scale per activity category
    #[serde(default)]
    pub activity: HashMap<ActivityCategory, GradeScale>,
    /// Icon name per category code (activity and place categories share this map)
    #[serde(default)]
    pub icons: HashMap<String, String>,
    /// Marker color per place category
    #[serde(default)]
    pub waypoint_color: HashMap<PlaceCategory, String>,
    /// Bar color per activity category
    #[serde(default)]
    pub activity_color: HashMap<ActivityCategory, String>,
}

impl Metadata {
    /// Load metadata from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let yaml =
            fs::read_to_string(path.as_ref()).map_err(|e| MetadataError::IoError(e.to_string()))?;
        Self::load_from_yaml(&yaml)
    }

    /// Load metadata from a YAML string.
    pub fn load_from_yaml(yaml: &str) -> Result<Self, MetadataError> {
        let metadata: Metadata =
            serde_yaml::from_str(yaml).map_err(|e| MetadataError::ParseError(e.to_string()))?;

        tracing::info!(
            grade_scales = metadata.activity.len(),
            icons = metadata.icons.len(),
            "Loaded metadata"
        );
        Ok(metadata)
    }

    /// Rank of `grade` on the scale of `category`, if both are known.
    pub fn grade_rank(&self, category: &ActivityCategory, grade: &str) -> Option<i64> {
        self.activity
            .get(category)
            .and_then(|scale| scale.grades.get(grade))
            .copied()
    }

    /// Grade labels for a category, easiest first. `["N/A"]` when the
    /// category has no scale.
    pub fn grade_options(&self, category: &ActivityCategory) -> Vec<String> {
        let Some(scale) = self.activity.get(category).filter(|s| !s.grades.is_empty()) else {
            return vec![NO_GRADE.to_string()];
        };

        let mut grades: Vec<(&String, &i64)> = scale.grades.iter().collect();
        grades.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        grades.into_iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn icon(&self, code: &str) -> Option<&str> {
        self.icons.get(code).map(String::as_str)
    }

    pub fn place_color(&self, category: &PlaceCategory) -> Option<&str> {
        self.waypoint_color.get(category).map(String::as_str)
    }

    pub fn activity_color(&self, category: &ActivityCategory) -> Option<&str> {
        self.activity_color.get(category).map(String::as_str)
    }
}

/// Errors from metadata loading.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse YAML: {0}")]
    ParseError(String),
}
