// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mountain_goats::config::Config;
use mountain_goats::db::{self, MemoryStore};
use mountain_goats::models::{Activity, ActivityCategory, Context, Metadata, Place, PlaceCategory, Role};
use mountain_goats::routes::create_router;
use mountain_goats::services::DatasetService;
use mountain_goats::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Metadata shipped with the application.
#[allow(dead_code)]
pub fn test_metadata() -> Metadata {
    Metadata::load_from_file("settings/metadata.yaml").expect("Failed to load metadata")
}

#[allow(dead_code)]
pub fn place(waypoint: &str, altitude: i32, category: PlaceCategory) -> Place {
    Place {
        waypoint: waypoint.to_string(),
        latitude: 45.9,
        longitude: 6.9,
        altitude,
        category,
    }
}

#[allow(dead_code)]
pub fn activity(id: u64, category: ActivityCategory, date: &str, days: f64, waypoints: &[&str]) -> Activity {
    Activity {
        id,
        label: format!("Sortie {}", id),
        category,
        grade: String::new(),
        date: date.to_string(),
        days,
        context: None,
        role: None,
        waypoints: waypoints.iter().map(|w| w.to_string()).collect(),
        participants: None,
        topo: None,
        comments: None,
    }
}

/// A small dataset around Chamonix.
#[allow(dead_code)]
pub fn sample_places() -> Vec<Place> {
    vec![
        Place {
            waypoint: "Mont Blanc".to_string(),
            latitude: 45.8326,
            longitude: 6.8652,
            altitude: 4808,
            category: PlaceCategory::Summit,
        },
        Place {
            waypoint: "Aiguille du Tour".to_string(),
            latitude: 45.9966,
            longitude: 7.0117,
            altitude: 3540,
            category: PlaceCategory::Summit,
        },
        Place {
            waypoint: "Col de Balme".to_string(),
            latitude: 46.0273,
            longitude: 6.9652,
            altitude: 2191,
            category: PlaceCategory::Pass,
        },
        Place {
            waypoint: "Refuge Albert 1er".to_string(),
            latitude: 45.9917,
            longitude: 7.0044,
            altitude: 2702,
            category: PlaceCategory::Hut,
        },
    ]
}

#[allow(dead_code)]
pub fn sample_activities() -> Vec<Activity> {
    let mut tour = activity(
        0,
        ActivityCategory::Mountaineering,
        "2019-07-20",
        2.0,
        &["Refuge Albert 1er", "Aiguille du Tour"],
    );
    tour.grade = "F+".to_string();
    tour.context = Some(Context::AlpineClub);
    tour.role = Some(Role::Second);
    tour.topo = Some("https://www.camptocamp.org/routes/47069".to_string());

    let mut balme = activity(1, ActivityCategory::Ski, "2020-02-10", 1.0, &["Col de Balme"]);
    balme.grade = "2.1".to_string();
    balme.context = Some(Context::Friends);

    let mut piste = activity(2, ActivityCategory::Ski, "2020-02-11", 0.5, &[]);
    piste.grade = "Piste".to_string();

    let mut blanc = activity(
        3,
        ActivityCategory::Mountaineering,
        "2021-08-02",
        2.5,
        &["Mont Blanc", "Dôme du Goûter"],
    );
    blanc.grade = "PD".to_string();
    blanc.context = Some(Context::WithGuide);

    vec![tour, balme, piste, blanc]
}

/// Create a test app over an in-memory store holding `places` and `activities`.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app_with(
    places: &[Place],
    activities: &[Activity],
) -> (Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    db::save_places(store.as_ref(), places, &[]).expect("Failed to seed places");
    db::save_activities(store.as_ref(), activities, &[]).expect("Failed to seed activities");

    let state = Arc::new(AppState {
        config: Config::default(),
        metadata: test_metadata(),
        dataset: DatasetService::load(store.clone()),
    });

    (create_router(state.clone()), state, store)
}

/// Create a test app with the sample dataset.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let (app, state, _) = create_test_app_with(&sample_places(), &sample_activities());
    (app, state)
}

/// Send a GET request and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    decode(response).await
}

/// Send a JSON body and decode the JSON response.
#[allow(dead_code)]
pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    decode(response).await
}

async fn decode(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
