//! Integration tests for readiness signals and status changes.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, create_order, get, post_json, uuid_of};
use serde_json::{json, Value};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn save_semaforo(app: &Router, uuid: &str, triple: [i64; 3]) -> (StatusCode, Value) {
    let response = post_json(
        app.clone(),
        &format!("/orders/{uuid}/save-semaforo"),
        json!({ "etichette": triple[0], "packaging": triple[1], "prodotto": triple[2] }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn change_status(app: &Router, uuid: &str, body: Value) -> (StatusCode, Value) {
    let response = post_json(app.clone(), &format!("/orders/{uuid}/change-status"), body).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn fetch(app: &Router, uuid: &str) -> Value {
    body_json(get(app.clone(), &format!("/orders/{uuid}")).await).await["data"].clone()
}

/// Create an order and move it to IN_ALLESTIMENTO.
async fn order_in_preparation(app: &Router) -> String {
    let uuid = uuid_of(&create_order(app, "ORD-1").await);
    let (status, _) = change_status(app, &uuid, json!({ "status": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    uuid
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_after_all_signals_turn_green() {
    let app = common::build_test_app();
    let uuid = order_in_preparation(&app).await;

    let (status, json) = save_semaforo(&app, &uuid, [2, 2, 0]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["all_green"], false);
    assert_eq!(json["can_change_to_lanciato"], false);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 2 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "INVALID_TRANSITION");

    let (_, json) = save_semaforo(&app, &uuid, [2, 2, 2]).await;
    assert_eq!(json["all_green"], true);
    assert_eq!(json["can_change_to_lanciato"], true);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["status"], 2);
    assert_eq!(fetch(&app, &uuid).await["status_name"], "LANCIATO");
}

#[tokio::test]
async fn all_green_outside_preparation_cannot_launch() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    let (_, json) = save_semaforo(&app, &uuid, [2, 2, 2]).await;

    assert_eq!(json["all_green"], true);
    assert_eq!(json["can_change_to_lanciato"], false);
    assert_eq!(fetch(&app, &uuid).await["status"], 0);
}

#[tokio::test]
async fn out_of_range_signal_is_rejected_and_not_stored() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    let (status, json) = save_semaforo(&app, &uuid, [2, 3, 0]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("packaging"));

    let semaforo = body_json(get(app, &format!("/orders/{uuid}/semaforo")).await).await;
    assert_eq!(
        semaforo["data"],
        json!({ "etichette": 0, "packaging": 0, "prodotto": 0, "all_green": false, "green_count": 0 })
    );
}

#[tokio::test]
async fn huge_or_fractional_signal_is_validation_error() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    for body in [
        r#"{"etichette":2,"packaging":2,"prodotto":99999999999999999999}"#,
        r#"{"etichette":2,"packaging":2,"prodotto":1.5}"#,
    ] {
        let body: Value = serde_json::from_str(body).unwrap();
        let response = post_json(app.clone(), &format!("/orders/{uuid}/save-semaforo"), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("prodotto"));
    }
}

#[tokio::test]
async fn save_semaforo_on_unknown_order_returns_404() {
    let app = common::build_test_app();

    let (status, json) = save_semaforo(&app, &Uuid::new_v4().to_string(), [0, 0, 0]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Suspension
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suspension_requires_reason() {
    let app = common::build_test_app();
    let uuid = order_in_preparation(&app).await;

    let (status, json) =
        change_status(&app, &uuid, json!({ "status": 4, "motivazione": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, _) = change_status(&app, &uuid, json!({ "status": 4 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fetch(&app, &uuid).await["status"], 1);
}

#[tokio::test]
async fn suspend_and_resume_clears_reason() {
    let app = common::build_test_app();
    let uuid = order_in_preparation(&app).await;

    let (status, _) = change_status(
        &app,
        &uuid,
        json!({ "status": 4, "motivazione": "  labels missing  " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let order = fetch(&app, &uuid).await;
    assert_eq!(order["status_name"], "SOSPESO");
    assert_eq!(order["motivazione"], "labels missing");

    let (status, _) = change_status(&app, &uuid, json!({ "status": 1 })).await;
    assert_eq!(status, StatusCode::OK);

    let order = fetch(&app, &uuid).await;
    assert_eq!(order["status"], 1);
    assert!(order["motivazione"].is_null());
}

// ---------------------------------------------------------------------------
// Force advance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn force_moves_planned_order_to_in_progress() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    let (status, _) = change_status(&app, &uuid, json!({ "status": 3 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 3, "force": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 3);
}

#[tokio::test]
async fn force_flag_is_ignored_for_other_targets() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 5, "force": true })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn settled_order_accepts_nothing() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);
    for body in [
        json!({ "status": 3, "force": true }),
        json!({ "status": 5 }),
        json!({ "status": 6 }),
    ] {
        let (status, _) = change_status(&app, &uuid, body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let allowed = body_json(get(app.clone(), &format!("/orders/{uuid}/allowed-statuses")).await).await;
    assert_eq!(allowed["data"], json!([]));

    for body in [
        json!({ "status": 4, "motivazione": "late payment" }),
        json!({ "status": 3, "force": true }),
    ] {
        let (status, _) = change_status(&app, &uuid, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// ---------------------------------------------------------------------------
// Allowed statuses, versions, malformed input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn allowed_statuses_follow_readiness() {
    let app = common::build_test_app();
    let uuid = order_in_preparation(&app).await;
    let uri = format!("/orders/{uuid}/allowed-statuses");

    let allowed = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(
        allowed["data"],
        json!([{ "id": 4, "name": "SOSPESO", "label": "Suspended" }])
    );

    save_semaforo(&app, &uuid, [2, 2, 2]).await;

    let allowed = body_json(get(app, &uri).await).await;
    let ids: Vec<i64> = allowed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 4]);
}

#[tokio::test]
async fn stale_client_version_returns_409() {
    let app = common::build_test_app();
    let order = create_order(&app, "ORD-1").await;
    let uuid = uuid_of(&order);
    save_semaforo(&app, &uuid, [1, 0, 0]).await;

    let (status, json) = change_status(&app, &uuid, json!({ "status": 1, "version": 1 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(fetch(&app, &uuid).await["status"], 0);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 1, "version": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["version"], 3);
}

#[tokio::test]
async fn unknown_status_code_is_validation_error() {
    let app = common::build_test_app();
    let uuid = uuid_of(&create_order(&app, "ORD-1").await);

    let (status, json) = change_status(&app, &uuid, json!({ "status": 9 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
