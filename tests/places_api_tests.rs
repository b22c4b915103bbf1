// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place listing, map and "new place" form.

use axum::http::StatusCode;
use mountain_goats::db::{self, collections, Store};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_list_places_with_names_and_altitude_bounds() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::get_json(app, "/api/places").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["names"],
        json!(["Aiguille du Tour", "Col de Balme", "Mont Blanc", "Refuge Albert 1er"])
    );
    assert_eq!(body["altitude"], json!({"min": 2191, "max": 4808}));
}

#[tokio::test]
async fn test_map_overview() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::get_json(app, "/api/map").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"]["type"], "FeatureCollection");
    assert_eq!(body["places"]["features"].as_array().unwrap().len(), 4);
    assert_eq!(body["view"]["zoom"], 8);
}

#[tokio::test]
async fn test_map_single_search_hit_zooms_in() {
    let (app, _) = common::create_test_app();

    let (_, body) = common::get_json(app, "/api/map?search=Mont%20Blanc").await;

    let features = body["places"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["waypoint"], "Mont Blanc");
    assert_eq!(features[0]["properties"]["color"], "red");
    assert_eq!(features[0]["properties"]["category_translated"], "Sommet");
    assert_eq!(body["view"]["zoom"], 12);
    assert_eq!(body["view"]["center"], json!([6.8652, 45.8326]));
}

#[tokio::test]
async fn test_map_category_and_altitude_filters() {
    let (app, _) = common::create_test_app();
    let (_, huts) = common::get_json(app, "/api/map?categories=hut&lang=en").await;
    let features = huts["places"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["category_translated"], "Hut");

    let (app, _) = common::create_test_app();
    let (_, high) = common::get_json(app, "/api/map?min_alt=3000").await;
    assert_eq!(high["places"]["features"].as_array().unwrap().len(), 2);

    // An empty selection shows every category on the map
    let (app, _) = common::create_test_app();
    let (_, all) = common::get_json(app, "/api/map?categories=").await;
    assert_eq!(all["places"]["features"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_place_returns_sorted_names_and_persists() {
    let (app, state, store) = common::create_test_app_with(&common::sample_places(), &[]);

    let (status, body) = common::send_json(
        app,
        "POST",
        "/api/places",
        json!({
            "waypoint": "Aiguille d'Argentière",
            "latitude": 45.9544,
            "longitude": 7.0194,
            "altitude": 3901,
            "category": "summit"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["names"],
        json!([
            "Aiguille d'Argentière",
            "Aiguille du Tour",
            "Col de Balme",
            "Mont Blanc",
            "Refuge Albert 1er"
        ])
    );
    assert!(body["updated_at"].as_str().unwrap().ends_with('Z'));

    assert_eq!(state.dataset.places().await.len(), 5);
    assert!(store.read(collections::PLACES).unwrap().is_some());
    assert_eq!(db::load_places(store.as_ref()).records.len(), 5);
}

#[tokio::test]
async fn test_create_duplicate_place_conflicts() {
    let (app, state) = common::create_test_app();

    let (status, body) = common::send_json(
        app,
        "POST",
        "/api/places",
        json!({
            "waypoint": "Col de Balme",
            "latitude": 46.0,
            "longitude": 6.9,
            "altitude": 2191,
            "category": "pass"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
    assert_eq!(state.dataset.places().await.len(), 4);
}

#[tokio::test]
async fn test_create_invalid_place_is_rejected() {
    let (app, state) = common::create_test_app();

    let (status, body) = common::send_json(
        app,
        "POST",
        "/api/places",
        json!({
            "waypoint": "Fosse",
            "latitude": 46.0,
            "longitude": 6.9,
            "altitude": -10,
            "category": "summit"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_str().unwrap().contains("altitude"));
    assert_eq!(state.dataset.places().await.len(), 4);
}
