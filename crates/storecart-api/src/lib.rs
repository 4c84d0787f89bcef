//! Storecart API — HTTP surface over the cart state manager.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router. `main.rs` adds the HTTP middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/cart", routes::cart::router())
        .with_state(state)
}
