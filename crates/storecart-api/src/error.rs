//! Storecart API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storecart_core::error::CartError;
use thiserror::Error;

use crate::config::ConfigError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The inventory HTTP client could not be built.
    #[error("inventory client error: {0}")]
    InventoryClient(#[from] reqwest::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `CartError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub CartError);

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CartError::StockExceeded { .. } => StatusCode::CONFLICT,
            CartError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            CartError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            CartError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.0.kind().as_str(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
