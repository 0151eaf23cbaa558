// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{as_user, create_test_app, TestApp};
use axum::http::StatusCode;
use repairdesk::domain::models::caller::CallerRole;
use serde_json::{json, Value};
use uuid::Uuid;

async fn stock_part(app: &TestApp, admin: Uuid, name: &str, part_number: &str, qty: i32) -> String {
    let response = as_user(app.server.post("/v1/spare-parts"), admin, CallerRole::Admin)
        .json(&json!({
            "name": name,
            "part_number": part_number,
            "quantity": qty,
            "price": 12.5
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

async fn quantity_of(app: &TestApp, user: Uuid, id: &str) -> i64 {
    let response = as_user(
        app.server.get(&format!("/v1/spare-parts/{}", id)),
        user,
        CallerRole::Officer,
    )
    .await;
    response.assert_status_ok();
    response.json::<Value>()["quantity"].as_i64().unwrap()
}

/// 新建任务扣减库存，删除任务退回库存
#[tokio::test]
async fn test_task_lifecycle_reconciles_stock() {
    let app = create_test_app().await;
    let admin = Uuid::new_v4();
    let officer = Uuid::new_v4();
    let fan = stock_part(&app, admin, "Fan", "F-1", 10).await;

    let response = as_user(app.server.post("/v1/repair-tasks"), officer, CallerRole::Officer)
        .json(&json!({
            "device_name": "Radio",
            "issue": "Overheating",
            "priority": "high",
            "spare_parts": [{ "name": "Fan", "part_number": "F-1", "quantity": 2 }]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["stock"]["applied"][0]["quantity_after"], 8);
    assert_eq!(body["stock"]["failed"], json!([]));
    assert_eq!(body["task"]["spare_parts"][0]["spare_part_id"], fan.as_str());
    let task_id = body["task"]["id"].as_str().unwrap().to_string();

    assert_eq!(quantity_of(&app, officer, &fan).await, 8);

    let response = as_user(
        app.server.put(&format!("/v1/repair-tasks/{}", task_id)),
        officer,
        CallerRole::Officer,
    )
    .json(&json!({
        "device_name": "Radio",
        "issue": "Overheating",
        "status": "in_progress",
        "priority": "high",
        "spare_parts": [{ "name": "Fan", "part_number": "F-1", "quantity": 3 }]
    }))
    .await;
    response.assert_status_ok();
    assert_eq!(quantity_of(&app, officer, &fan).await, 7);

    as_user(
        app.server.delete(&format!("/v1/repair-tasks/{}", task_id)),
        officer,
        CallerRole::Officer,
    )
    .await
    .assert_status_ok();
    assert_eq!(quantity_of(&app, officer, &fan).await, 10);

    as_user(
        app.server.get(&format!("/v1/repair-tasks/{}", task_id)),
        officer,
        CallerRole::Officer,
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_part_is_reported_not_fatal() {
    let app = create_test_app().await;
    let officer = Uuid::new_v4();

    let response = as_user(app.server.post("/v1/repair-tasks"), officer, CallerRole::Officer)
        .json(&json!({
            "device_name": "Radio",
            "issue": "No power",
            "spare_parts": [{ "name": "Capacitor", "part_number": "C-9", "quantity": 1 }]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["stock"]["failed"][0]["reason"]["kind"], "part_not_found");
    assert_eq!(body["task"]["status"], "pending");
}

#[tokio::test]
async fn test_zero_quantity_part_is_rejected() {
    let app = create_test_app().await;

    let response = as_user(
        app.server.post("/v1/repair-tasks"),
        Uuid::new_v4(),
        CallerRole::Admin,
    )
    .json(&json!({
        "device_name": "Radio",
        "issue": "No power",
        "spare_parts": [{ "name": "Fan", "part_number": "F-1", "quantity": 0 }]
    }))
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_completed_tasks_move_to_history_listing() {
    let app = create_test_app().await;
    let admin = Uuid::new_v4();
    for (issue, status) in [("Static", "completed"), ("No power", "pending")] {
        as_user(app.server.post("/v1/repair-tasks"), admin, CallerRole::Admin)
            .json(&json!({
                "device_name": "Radio",
                "issue": issue,
                "status": status,
                "spare_parts": []
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let open: Value = as_user(app.server.get("/v1/repair-tasks"), admin, CallerRole::Admin)
        .await
        .json();
    let done: Value = as_user(
        app.server.get("/v1/repair-history").add_query_param("search", "stat"),
        admin,
        CallerRole::Admin,
    )
    .await
    .json();
    let devices: Value = as_user(app.server.get("/v1/devices"), admin, CallerRole::Admin)
        .await
        .json();

    assert_eq!(open["total"], 1);
    assert_eq!(open["items"][0]["issue"], "No power");
    assert_eq!(done["total"], 1);
    assert_eq!(devices, json!(["Radio"]));
}
