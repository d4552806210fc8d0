// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use std::sync::Arc;
use tokio::sync::Mutex;
use workout_tracker::config::Config;
use workout_tracker::models::Coordinate;
use workout_tracker::routes::create_router;
use workout_tracker::services::{SessionController, SessionHandle};
use workout_tracker::ui::{FixedPosition, RecordingUi, ReportedPosition};
use workout_tracker::AppState;

/// Position the fixed-position test app starts at.
#[allow(dead_code)]
pub fn home() -> Coordinate {
    Coordinate::new(40.1, -74.0).expect("valid coordinate")
}

/// Create a test app whose map initializes from a fixed position.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let controller = SessionController::new(RecordingUi::new(), config.session_settings());
    let session = SessionHandle::spawn(controller, FixedPosition(home()));

    let state = Arc::new(AppState {
        config,
        session,
        position_reporter: Mutex::new(None),
    });

    (create_router(state.clone()), state)
}

/// Create a test app that waits for `/api/position`.
#[allow(dead_code)]
pub fn create_test_app_awaiting_position() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let controller = SessionController::new(RecordingUi::new(), config.session_settings());
    let (reporter, position) = ReportedPosition::channel();
    let session = SessionHandle::spawn(controller, position);

    let state = Arc::new(AppState {
        config,
        session,
        position_reporter: Mutex::new(Some(reporter)),
    });

    (create_router(state.clone()), state)
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
