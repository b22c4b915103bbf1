// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity table, form and detail panel.

use axum::http::StatusCode;
use mountain_goats::db;
use serde_json::{json, Value};

mod common;

fn ids(body: &Value) -> Vec<u64> {
    body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect()
}

fn form() -> Value {
    json!({
        "label": "Aiguille du Tour par la voie normale",
        "category": "mountaineering",
        "grade": "PD-",
        "date": "2023-07-01",
        "days": 1.5,
        "context": "friends",
        "role": "lead",
        "waypoints": ["Refuge Albert 1er", "Aiguille du Tour"],
        "participants": 2,
        "topo": "",
        "comments": ""
    })
}

#[tokio::test]
async fn test_list_newest_first_with_derived_fields() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::get_json(app, "/api/activities").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1, 0]);
    assert_eq!(body["count"], 4);
    assert_eq!(body["total_days"], 6);

    let oldest = &body["activities"][3];
    assert_eq!(oldest["year"], 2019);
    assert_eq!(oldest["grade_num"], 1);
    assert_eq!(oldest["category_translated"], "Alpinisme");
    assert_eq!(oldest["role_translated"], "Seconde cordée");
    assert_eq!(oldest["waypoints"], "Refuge Albert 1er, Aiguille du Tour");
}

#[tokio::test]
async fn test_list_in_english_with_role_placeholder() {
    let (app, _) = common::create_test_app();

    let (_, body) = common::get_json(app, "/api/activities?lang=en").await;

    let newest = &body["activities"][0];
    assert_eq!(newest["category_translated"], "Mountaineering");
    assert_eq!(newest["context_translated"], "With a guide");
    assert_eq!(newest["role_translated"], "not filled");
}

#[tokio::test]
async fn test_waypoint_substring_filter() {
    let (app, _) = common::create_test_app();
    let (_, body) = common::get_json(app, "/api/activities?waypoint=Balme").await;
    assert_eq!(ids(&body), vec![1]);

    let (app, _) = common::create_test_app();
    let (_, body) = common::get_json(app, "/api/activities?waypoint=balme").await;
    assert!(ids(&body).is_empty());
    assert_eq!(body["total_days"], 0);
}

#[tokio::test]
async fn test_year_range_filter() {
    let (app, _) = common::create_test_app();

    let (_, body) = common::get_json(app, "/api/activities?from_year=2020&to_year=2020").await;

    assert_eq!(ids(&body), vec![2, 1]);
    assert_eq!(body["total_days"], 2);
}

#[tokio::test]
async fn test_create_assigns_next_id() {
    let mut activities = common::sample_activities();
    activities[3].id = 7;
    let (app, state, store) = common::create_test_app_with(&common::sample_places(), &activities);

    let (status, body) = common::send_json(app, "POST", "/api/activities", form()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 8);
    assert_eq!(body["topo"], Value::Null);
    assert_eq!(state.dataset.activities().await.len(), 5);

    let persisted = db::load_activities(store.as_ref()).records;
    let created = persisted.iter().find(|a| a.id == 8).unwrap();
    assert_eq!(created.waypoints, vec!["Refuge Albert 1er", "Aiguille du Tour"]);
    assert_eq!(created.participants, Some(2));
}

#[tokio::test]
async fn test_create_first_activity_gets_id_zero() {
    let (app, _, _) = common::create_test_app_with(&[], &[]);

    let (status, body) = common::send_json(app, "POST", "/api/activities", form()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 0);
}

#[tokio::test]
async fn test_update_replaces_record() {
    let (app, state) = common::create_test_app();

    let (status, body) = common::send_json(app, "PUT", "/api/activities/1", form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    let updated = state.dataset.activity(1).await.unwrap();
    assert_eq!(updated.label, "Aiguille du Tour par la voie normale");
    assert_eq!(updated.days, 1.5);
    assert_eq!(state.dataset.activities().await.len(), 4);
}

#[tokio::test]
async fn test_update_unknown_activity() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send_json(app, "PUT", "/api/activities/99", form()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_invalid_form_is_rejected() {
    let (app, state) = common::create_test_app();
    let mut body = form();
    body["date"] = json!("le 1er juillet");
    body["days"] = json!(0);

    let (status, response) = common::send_json(app, "POST", "/api/activities", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "validation_error");
    assert_eq!(state.dataset.activities().await.len(), 4);
}

#[tokio::test]
async fn test_details_panel() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::get_json(app, "/api/activities/0/details").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"], "2 days");
    assert_eq!(body["grade"], "F+");
    assert_eq!(body["topo"]["label"], "Camptocamp");
    assert_eq!(body["comments"], "Aucun commentaire");
    assert_eq!(body["icon"], "mdi:image-filter-hdr");
    assert_eq!(body["waypoints"][0]["waypoint"], "Aiguille du Tour");
    assert_eq!(body["waypoints"][1]["waypoint"], "Refuge Albert 1er");
    assert_eq!(body["waypoints"][1]["color"], "green");
}

#[tokio::test]
async fn test_details_unknown_activity() {
    let (app, _) = common::create_test_app();
    let (status, _) = common::get_json(app, "/api/activities/42/details").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grade_options() {
    let (app, _) = common::create_test_app();
    let (status, body) = common::get_json(app, "/api/grades/hike").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grades"], json!(["T1", "T2", "T3", "T4", "T5", "T6"]));

    let (app, _) = common::create_test_app();
    let (_, body) = common::get_json(app, "/api/grades/bike").await;
    assert_eq!(body["grades"], json!(["N/A"]));
}
