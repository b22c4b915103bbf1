// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mountain Goats: personal tracker for mountain outings.
//!
//! This crate provides the backend API that stores visited places and
//! activities and turns them into the map, tables and charts of the
//! dashboard.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use models::Metadata;
use services::{DatasetService, Language};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub metadata: Metadata,
    pub dataset: DatasetService,
}

impl AppState {
    /// Language for a request, falling back to the configured default.
    pub fn language(&self, requested: Option<Language>) -> Language {
        requested.unwrap_or(self.config.default_language)
    }
}
