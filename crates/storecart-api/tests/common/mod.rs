//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storecart_cart::CartManager;
use storecart_core::store::CartStore;
use storecart_test_support::{FixedClock, RecordingCartStore, StubInventoryGateway};
use tower::ServiceExt;

use storecart_api::state::AppState;

/// Build the full app router around a manager loaded from `store`, with a
/// fixed clock. Uses the same route structure as `main.rs`.
pub async fn build_test_app_with_store(
    gateway: StubInventoryGateway,
    store: Arc<dyn CartStore>,
) -> Router {
    let manager = CartManager::load(Arc::new(gateway), store, Arc::new(FixedClock::default())).await;
    storecart_api::app(AppState::new(Arc::new(manager)))
}

/// Build the full app router with an empty recording store.
pub async fn build_test_app(gateway: StubInventoryGateway) -> (Router, Arc<RecordingCartStore>) {
    let store = Arc::new(RecordingCartStore::new());
    let app = build_test_app_with_store(gateway, Arc::clone(&store) as Arc<dyn CartStore>).await;
    (app, store)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
