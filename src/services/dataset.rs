// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory dataset and its mutations.
//!
//! Both collections are loaded once at startup. Every mutation writes the whole
//! collection to the store and only then replaces the in-memory copy, holding
//! the write lock throughout so that two saves never interleave.
//!
//! Stored rows that cannot be decoded stay out of the dataset but are kept
//! as loaded and written back with every save.

use crate::db::{self, table, Store, StoreError};
use crate::models::{Activity, Place};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The two stored collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub places: Vec<Place>,
    pub activities: Vec<Activity>,
}

/// Errors from dataset mutations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Place already exists: {0}")]
    DuplicatePlace(String),

    #[error("Activity {0} not found")]
    ActivityNotFound(u64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Next activity id: max existing id + 1, or 0 for an empty collection.
/// Gaps are never reused.
pub fn next_activity_id(activities: &[Activity]) -> u64 {
    activities
        .iter()
        .map(|a| a.id)
        .max()
        .map_or(0, |max| max + 1)
}

/// Sorted, de-duplicated place names for the search dropdown.
pub fn place_names(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .map(|p| p.waypoint.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Owner of the dataset for the running process.
pub struct DatasetService {
    store: Arc<dyn Store>,
    data: RwLock<Dataset>,
    unreadable_places: Vec<Value>,
    unreadable_activities: Vec<Value>,
}

impl DatasetService {
    /// Load both collections from `store`. Missing or malformed collections
    /// come back empty.
    pub fn load(store: Arc<dyn Store>) -> Self {
        let places = db::load_places(store.as_ref());
        let activities = db::load_activities(store.as_ref());
        let data = Dataset {
            places: places.records,
            activities: activities.records,
        };
        tracing::info!(
            places = data.places.len(),
            activities = data.activities.len(),
            unreadable = places.unreadable.len() + activities.unreadable.len(),
            "Dataset loaded"
        );

        Self {
            store,
            data: RwLock::new(data),
            unreadable_places: places.unreadable,
            unreadable_activities: activities.unreadable,
        }
    }

    fn is_known_place(&self, places: &[Place], waypoint: &str) -> bool {
        places.iter().any(|p| p.waypoint == waypoint)
            || self
                .unreadable_places
                .iter()
                .any(|row| row.get("waypoint").and_then(Value::as_str) == Some(waypoint))
    }

    /// Copy of the current dataset.
    pub async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    pub async fn places(&self) -> Vec<Place> {
        self.data.read().await.places.clone()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.data.read().await.activities.clone()
    }

    pub async fn activity(&self, id: u64) -> Option<Activity> {
        self.data
            .read()
            .await
            .activities
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Append a new place and persist. Returns the updated list of place names.
    pub async fn add_place(&self, place: Place) -> Result<Vec<String>, DatasetError> {
        let mut data = self.data.write().await;
        if self.is_known_place(&data.places, &place.waypoint) {
            return Err(DatasetError::DuplicatePlace(place.waypoint));
        }

        let mut places = data.places.clone();
        tracing::info!(waypoint = %place.waypoint, altitude = place.altitude, "Adding place");
        places.push(place);

        db::save_places(self.store.as_ref(), &places, &self.unreadable_places)?;
        let names = place_names(&places);
        data.places = places;
        Ok(names)
    }

    /// Append a new activity under the next free id and persist.
    ///
    /// Any id already set on `activity` is replaced. Ids held by unreadable
    /// rows are never handed out.
    pub async fn create_activity(&self, mut activity: Activity) -> Result<Activity, DatasetError> {
        let mut data = self.data.write().await;
        activity.id = next_activity_id(&data.activities)
            .max(table::next_free_id(&self.unreadable_activities));

        let mut activities = data.activities.clone();
        activities.push(activity.clone());

        db::save_activities(self.store.as_ref(), &activities, &self.unreadable_activities)?;
        data.activities = activities;

        tracing::info!(id = activity.id, label = %activity.label, "Activity created");
        Ok(activity)
    }

    /// Replace the activity with the same id and persist.
    pub async fn update_activity(&self, activity: Activity) -> Result<Activity, DatasetError> {
        let mut data = self.data.write().await;
        let Some(index) = data.activities.iter().position(|a| a.id == activity.id) else {
            return Err(DatasetError::ActivityNotFound(activity.id));
        };

        let mut activities = data.activities.clone();
        activities[index] = activity.clone();

        db::save_activities(self.store.as_ref(), &activities, &self.unreadable_activities)?;
        data.activities = activities;

        tracing::info!(id = activity.id, "Activity updated");
        Ok(activity)
    }
}
