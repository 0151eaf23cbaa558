// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{as_user, create_test_app, create_test_app_with_settings, TestApp};
use axum::http::StatusCode;
use repairdesk::config::settings::Settings;
use repairdesk::domain::models::caller::CallerRole;
use serde_json::{json, Value};
use uuid::Uuid;

async fn open_task(app: &TestApp, admin: Uuid, device_name: &str) -> String {
    let response = as_user(app.server.post("/v1/repair-tasks"), admin, CallerRole::Admin)
        .json(&json!({
            "device_name": device_name,
            "issue": "No power",
            "spare_parts": []
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["task"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn add_rule(app: &TestApp, admin: Uuid, device_name: &str, technician: Option<Uuid>) {
    as_user(app.server.post("/v1/assignment-rules"), admin, CallerRole::Admin)
        .json(&json!({ "device_name": device_name, "assigned_user_id": technician }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_auto_assign_respects_workload_cap() {
    let settings: Settings = Settings::defaults()
        .unwrap()
        .set_override("metrics.enabled", false)
        .unwrap()
        .set_override("assignment.workload_cap", 1)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let app = create_test_app_with_settings(settings).await;
    let admin = Uuid::new_v4();
    let technician = Uuid::new_v4();
    add_rule(&app, admin, "Radio", Some(technician)).await;
    let first = open_task(&app, admin, "Radio").await;
    let second = open_task(&app, admin, "Radio").await;

    let response = as_user(
        app.server.post(&format!("/v1/repair-tasks/{}/auto-assign", first)),
        admin,
        CallerRole::Admin,
    )
    .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "assigned");
    assert_eq!(body["technician_id"], technician.to_string());

    let response = as_user(
        app.server.post(&format!("/v1/repair-tasks/{}/auto-assign", second)),
        admin,
        CallerRole::Admin,
    )
    .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["outcome"], "at_capacity");

    let history: Value = as_user(
        app.server.get(&format!("/v1/repair-tasks/{}/history", first)),
        technician,
        CallerRole::Technician,
    )
    .await
    .json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["action"], "auto-assigned");

    let mine: Value = as_user(app.server.get("/v1/repair-tasks"), technician, CallerRole::Technician)
        .await
        .json();
    assert_eq!(mine["total"], 1);
    assert_eq!(mine["items"][0]["id"], first.as_str());
}

#[tokio::test]
async fn test_auto_assign_without_rule() {
    let app = create_test_app().await;
    let admin = Uuid::new_v4();
    let task = open_task(&app, admin, "Laptop").await;

    let response = as_user(
        app.server.post(&format!("/v1/repair-tasks/{}/auto-assign", task)),
        admin,
        CallerRole::Admin,
    )
    .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["outcome"], "no_rule");
}

#[tokio::test]
async fn test_auto_assign_rule_without_technician() {
    let app = create_test_app().await;
    let admin = Uuid::new_v4();
    add_rule(&app, admin, "Radio", None).await;
    let task = open_task(&app, admin, "Radio").await;

    let response = as_user(
        app.server.post(&format!("/v1/repair-tasks/{}/auto-assign", task)),
        admin,
        CallerRole::Admin,
    )
    .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["outcome"], "no_technician");
}

#[tokio::test]
async fn test_duplicate_rule_conflicts() {
    let app = create_test_app().await;
    let admin = Uuid::new_v4();
    add_rule(&app, admin, "Radio", None).await;

    as_user(app.server.post("/v1/assignment-rules"), admin, CallerRole::Admin)
        .json(&json!({ "device_name": "Radio", "assigned_user_id": Uuid::new_v4() }))
        .await
        .assert_status(StatusCode::CONFLICT);
}
