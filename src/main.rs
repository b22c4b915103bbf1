// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mountain Goats API Server
//!
//! Serves the places and activities dataset, with its map, tables and
//! statistics, to the dashboard frontend.

use anyhow::Context;
use mountain_goats::{
    config::Config, db::JsonFileStore, models::Metadata, services::DatasetService, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(port = config.port, "Starting Mountain Goats API");

    // Grade scales, icons and colors
    tracing::info!(path = %config.metadata_path.display(), "Loading metadata");
    let metadata = Metadata::load_from_file(&config.metadata_path).with_context(|| {
        format!("Failed to load metadata from {}", config.metadata_path.display())
    })?;

    // Places and activities
    tracing::info!(dir = %config.data_dir.display(), "Loading dataset");
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let dataset = DatasetService::load(store);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        metadata,
        dataset,
    });

    // Build router
    let app = mountain_goats::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mountain_goats=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
