// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One JSON file per collection in a data directory.
//!
//! Writes overwrite the file in place; the last writer wins.

use crate::db::{Store, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed document store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `collection`.
    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

impl Store for JsonFileStore {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(collection);
        match fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn write(&self, collection: &str, document: &str) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        fs::write(&path, document).map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{load_places, save_places};
    use crate::models::{Place, PlaceCategory};

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.read("places").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.write("places", "{\"data\":[]}").unwrap();

        assert_eq!(store.read("places").unwrap().as_deref(), Some("{\"data\":[]}"));
        assert!(store.path_for("places").exists());
    }

    #[test]
    fn test_places_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let places = vec![Place {
            waypoint: "Lac Blanc".to_string(),
            latitude: 45.978,
            longitude: 6.887,
            altitude: 2352,
            category: PlaceCategory::Poi,
        }];

        save_places(&JsonFileStore::new(dir.path()), &places, &[]).unwrap();

        let reopened = JsonFileStore::new(dir.path());
        assert_eq!(load_places(&reopened).records, places);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope"));
        assert!(matches!(store.write("places", "{}"), Err(StoreError::Io(_))));
    }
}
