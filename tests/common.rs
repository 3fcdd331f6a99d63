/// Common test utilities for Ecoponto integration tests
///
/// This file contains shared functions and utilities for all integration tests,
/// including test application setup and helper functions for driving the API.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ecoponto::{create_app, db::init_pool, run_migrations, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

/// The assets base URL used by the test application
pub const UPLOADS_URL: &str = "http://localhost:3333/uploads";

/// Creates a test application with an in-memory SQLite database
///
/// This helper function:
/// 1. Creates a unique shared in-memory SQLite database
/// 2. Runs migrations to set up the schema and seed the item catalog
/// 3. Creates an Axum application over it
///
/// A unique `cache=shared` URI is used instead of plain `:memory:` so every
/// connection in the pool sees the same database while tests stay isolated
/// from each other.
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an in-memory database
pub fn create_test_app() -> Router {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    run_migrations(conn);

    let state = AppState::new(pool, UPLOADS_URL, "placeholder.svg");
    create_app(state)
}

/// Builds a valid point registration payload accepting the given items
#[allow(dead_code)]
pub fn sample_point_body(items: &[i32]) -> Value {
    json!({
        "name": "Mercado Verde",
        "email": "contato@mercadoverde.com",
        "whatsapp": "+5511999990000",
        "latitude": -23.55,
        "longitude": -46.63,
        "city": "São Paulo",
        "uf": "SP",
        "items": items,
    })
}

/// Sends a POST request with a JSON body and parses the JSON response
#[allow(dead_code)]
pub async fn post_json(app: &mut Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Sends a GET request and parses the JSON response
pub async fn get_json(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Registers a point via the API and returns the created point
///
/// Asserts that the response is a 201 with an assigned id.
#[allow(dead_code)]
pub async fn create_point(app: &mut Router, items: &[i32]) -> Value {
    let (status, body) = post_json(app, "/points", sample_point_body(items)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    body
}
