#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use ordini_api::config::{LogFormat, ServerConfig};
use ordini_api::router::build_app_router;
use ordini_api::state::AppState;
use ordini_core::memory::MemoryOrderStore;
use ordini_planning::{PlanningError, RescheduleResponse, Rescheduler};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        planning_url: "http://planner.invalid/api/planning".to_string(),
        planning_timeout_secs: 1,
        log_format: LogFormat::Text,
    }
}

// ---------------------------------------------------------------------------
// Planning service stub
// ---------------------------------------------------------------------------

/// What the stub planning service does when called.
#[derive(Clone)]
pub enum StubReply {
    Answer(RescheduleResponse),
    Unavailable,
}

/// In-process [`Rescheduler`] that records every order it was asked to re-plan.
pub struct StubRescheduler {
    reply: StubReply,
    calls: Mutex<Vec<Uuid>>,
}

impl StubRescheduler {
    pub fn answering(error_code: i32, message: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            reply: StubReply::Answer(RescheduleResponse {
                error_code,
                message: message.map(str::to_string),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            reply: StubReply::Unavailable,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Uuid> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Rescheduler for StubRescheduler {
    async fn force_reschedule(
        &self,
        order_uuid: Uuid,
    ) -> Result<RescheduleResponse, PlanningError> {
        self.calls.lock().unwrap().push(order_uuid);
        match &self.reply {
            StubReply::Answer(reply) => Ok(reply.clone()),
            StubReply::Unavailable => Err(PlanningError::ApiError {
                status: 503,
                body: "planner down".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router on a fresh in-memory store with a
/// planning stub that always succeeds.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery).
pub fn build_test_app() -> Router {
    build_test_app_with_planner(StubRescheduler::answering(0, None))
}

/// Like [`build_test_app`], with a caller-provided planning stub.
pub fn build_test_app_with_planner(planner: Arc<StubRescheduler>) -> Router {
    let config = test_config();
    let state = AppState::new(
        Arc::new(MemoryOrderStore::new()),
        planner,
        config.clone(),
        None,
    );
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an order through the API and return its JSON view.
pub async fn create_order(app: &Router, code: &str) -> Value {
    let response = post_json(
        app.clone(),
        "/orders",
        serde_json::json!({ "code": code, "customer": "Cartiera Nord", "quantity": 1000 }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Uuid of an order view, as a string usable in paths.
pub fn uuid_of(order: &Value) -> String {
    order["uuid"].as_str().unwrap().to_string()
}
