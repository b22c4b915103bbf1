// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer.
//!
//! A [`Store`] only moves whole documents in and out of durable storage.
//! Encoding, decoding and the fail-open policy live here so every backend
//! behaves the same.

pub mod json_file;
pub mod memory;
pub mod table;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{Activity, Place};
use serde_json::Value;
use table::{RawTable, TableRecord};

/// Collection names as constants.
pub mod collections {
    pub const PLACES: &str = "places";
    pub const ACTIVITIES: &str = "activities";
}

/// Key-value document storage.
pub trait Store: Send + Sync {
    /// Read a collection document. `Ok(None)` if it does not exist yet.
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError>;

    /// Replace a collection document.
    fn write(&self, collection: &str, document: &str) -> Result<(), StoreError>;
}

/// Records of one collection, plus the stored rows that could not be decoded.
///
/// Unreadable rows never reach the views but are written back unchanged on
/// every save, so loading and saving never loses data.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub unreadable: Vec<Value>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

/// Load all places. Any failure yields an empty collection.
pub fn load_places(store: &dyn Store) -> Collection<Place> {
    load_collection(store, collections::PLACES, |_| 0)
}

/// Load all activities. Any failure yields an empty collection.
pub fn load_activities(store: &dyn Store) -> Collection<Activity> {
    load_collection(store, collections::ACTIVITIES, table::assign_missing_ids)
}

pub fn save_places(store: &dyn Store, places: &[Place], unreadable: &[Value]) -> Result<(), StoreError> {
    save_collection(store, collections::PLACES, places, unreadable)
}

pub fn save_activities(
    store: &dyn Store,
    activities: &[Activity],
    unreadable: &[Value],
) -> Result<(), StoreError> {
    save_collection(store, collections::ACTIVITIES, activities, unreadable)
}

fn load_collection<T: TableRecord>(
    store: &dyn Store,
    collection: &str,
    prepare: impl FnOnce(&mut [Value]) -> usize,
) -> Collection<T> {
    let document = match store.read(collection) {
        Ok(Some(document)) => document,
        Ok(None) => {
            tracing::warn!(collection, "Collection not found, starting empty");
            return Collection::default();
        }
        Err(e) => {
            tracing::warn!(collection, error = %e, "Failed to read collection, starting empty");
            return Collection::default();
        }
    };

    let mut raw: RawTable = match serde_json::from_str(&document) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(collection, error = %e, "Malformed collection, starting empty");
            return Collection::default();
        }
    };

    let assigned = prepare(&mut raw.data);
    if assigned > 0 {
        tracing::info!(collection, assigned, "Assigned ids to legacy records");
    }

    let decoded = table::decode_rows::<T>(raw.data);
    if !decoded.unreadable.is_empty() {
        tracing::warn!(
            collection,
            unreadable = decoded.unreadable.len(),
            "Malformed records kept aside"
        );
    }

    tracing::info!(collection, count = decoded.records.len(), "Loaded collection");
    Collection {
        records: decoded.records,
        unreadable: decoded.unreadable,
    }
}

fn save_collection<T: TableRecord>(
    store: &dyn Store,
    collection: &str,
    records: &[T],
    unreadable: &[Value],
) -> Result<(), StoreError> {
    let document =
        table::encode(records, unreadable).map_err(|e| StoreError::Encode(e.to_string()))?;
    store.write(collection, &document)?;
    tracing::debug!(collection, count = records.len(), "Saved collection");
    Ok(())
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Failed to encode collection: {0}")]
    Encode(String),
}
