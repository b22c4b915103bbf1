// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store for tests and throwaway sessions.

use crate::db::{Store, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::Io("memory store lock poisoned".to_string()))?;
        Ok(documents.get(collection).cloned())
    }

    fn write(&self, collection: &str, document: &str) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::Io("memory store lock poisoned".to_string()))?;
        documents.insert(collection.to_string(), document.to_string());
        Ok(())
    }
}
