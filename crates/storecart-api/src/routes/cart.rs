//! Routes for the Cart bounded context.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use storecart_cart::CartOutcome;
use storecart_cart::application::query_handlers::{self, CartView};
use storecart_cart::domain::commands;
use storecart_core::product::ProductId;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /add-product and POST /remove-product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    /// The product to act on.
    pub product_id: ProductId,
}

/// Request body for POST /update-product-amount.
#[derive(Debug, Deserialize)]
pub struct UpdateProductAmountRequest {
    /// The product whose quantity changes.
    pub product_id: ProductId,
    /// Desired quantity. Non-positive values leave the cart untouched.
    pub amount: i64,
}

/// Response body returned after a cart operation.
#[derive(Debug, Serialize)]
pub struct CartOperationResponse {
    /// The cart after the operation.
    #[serde(flatten)]
    pub cart: CartView,
    /// Whether the operation committed a new cart.
    pub changed: bool,
}

impl From<CartOutcome> for CartOperationResponse {
    fn from(outcome: CartOutcome) -> Self {
        Self {
            cart: query_handlers::get_cart_view(outcome.cart()),
            changed: outcome.is_committed(),
        }
    }
}

/// GET /
async fn get_cart(State(state): State<AppState>) -> Json<CartView> {
    let snapshot = state.cart_manager.snapshot();
    Json(query_handlers::get_cart_view(&snapshot))
}

/// POST /add-product
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
async fn add_product(
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<CartOperationResponse>, ApiError> {
    let command = commands::AddProduct {
        correlation_id: Uuid::new_v4(),
        product_id: request.product_id,
    };

    info!(correlation_id = %command.correlation_id, "handling add_product command");

    let outcome = state.cart_manager.execute_add_product(&command).await?;

    Ok(Json(outcome.into()))
}

/// POST /remove-product
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
async fn remove_product(
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<CartOperationResponse>, ApiError> {
    let command = commands::RemoveProduct {
        correlation_id: Uuid::new_v4(),
        product_id: request.product_id,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_product command");

    let outcome = state.cart_manager.execute_remove_product(&command).await?;

    Ok(Json(outcome.into()))
}

/// POST /update-product-amount
#[instrument(skip(state, request), fields(product_id = %request.product_id, amount = request.amount))]
async fn update_product_amount(
    State(state): State<AppState>,
    Json(request): Json<UpdateProductAmountRequest>,
) -> Result<Json<CartOperationResponse>, ApiError> {
    let command = commands::UpdateProductAmount {
        correlation_id: Uuid::new_v4(),
        product_id: request.product_id,
        amount: request.amount,
    };

    info!(correlation_id = %command.correlation_id, "handling update_product_amount command");

    let outcome = state
        .cart_manager
        .execute_update_product_amount(&command)
        .await?;

    Ok(Json(outcome.into()))
}

/// Returns the router for the cart context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/add-product", post(add_product))
        .route("/remove-product", post(remove_product))
        .route("/update-product-amount", post(update_product_amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use storecart_cart::CartManager;
    use storecart_core::gateway::InventoryGateway;
    use storecart_test_support::{
        EmptyCartStore, FailingInventoryGateway, FixedClock, StubInventoryGateway, sample_product,
    };
    use tower::ServiceExt;

    fn app_with(gateway: Arc<dyn InventoryGateway>) -> Router {
        let manager = CartManager::with_cart(
            storecart_cart::Cart::new(),
            gateway,
            Arc::new(EmptyCartStore),
            Arc::new(FixedClock::default()),
        );
        router().with_state(AppState::new(Arc::new(manager)))
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_add_product_returns_cart_with_changed_flag() {
        // Arrange
        let gateway = StubInventoryGateway::new().with_product(sample_product(42), 3);
        let app = app_with(Arc::new(gateway));

        // Act
        let (status, json) = post_json(app, "/add-product", &serde_json::json!({ "product_id": 42 })).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["changed"], true);
        assert_eq!(json["amounts"]["42"], 1);
        assert_eq!(json["total_items"], 1);
    }

    #[tokio::test]
    async fn test_add_product_with_unreachable_inventory_returns_502() {
        let app = app_with(Arc::new(FailingInventoryGateway));

        let (status, json) = post_json(app, "/add-product", &serde_json::json!({ "product_id": 1 })).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "fetch_failure");
    }

    #[tokio::test]
    async fn test_remove_absent_product_returns_404() {
        let app = app_with(Arc::new(StubInventoryGateway::new()));

        let (status, json) =
            post_json(app, "/remove-product", &serde_json::json!({ "product_id": 9 })).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "item_not_found");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_reaching_the_cart() {
        let app = app_with(Arc::new(StubInventoryGateway::new()));

        let request = Request::builder()
            .method("POST")
            .uri("/add-product")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"product_id":"abc"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }
}
