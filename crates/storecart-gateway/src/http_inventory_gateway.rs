//! `reqwest` implementation of the `InventoryGateway` trait.
//!
//! Endpoints:
//! - `GET {base}/stock/{id}` → `{ "id": 1, "amount": 3 }`
//! - `GET {base}/products/{id}` → `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
//!
//! Every failure mode (transport error, timeout, 404, other non-success
//! status, undecodable body, mismatched id) surfaces as
//! `CartError::FetchFailure`. No retries are attempted.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use storecart_core::error::CartError;
use storecart_core::gateway::{InventoryGateway, ProductRecord, StockRecord};
use storecart_core::product::ProductId;
use tracing::{debug, error, instrument};

/// HTTP client for the inventory service.
#[derive(Debug, Clone)]
pub struct HttpInventoryGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryGateway {
    /// Creates a gateway for the service at `base_url` with a per-request
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, CartError> {
        let url = format!("{}/{path}", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                CartError::FetchFailure(format!("request to {url} timed out"))
            } else {
                CartError::FetchFailure(format!("request to {url} failed: {e}"))
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CartError::FetchFailure(format!("{path} not found")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CartError::FetchFailure(format!("reading {url} failed: {e}")))?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Inventory service returned non-success status"
            );
            return Err(CartError::FetchFailure(format!("HTTP {status} from {url}")));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse inventory service response"
            );
            CartError::FetchFailure(format!("unexpected response shape from {url}: {e}"))
        })
    }
}

fn ensure_same_product(requested: ProductId, returned: ProductId) -> Result<(), CartError> {
    if requested == returned {
        Ok(())
    } else {
        Err(CartError::FetchFailure(format!(
            "asked for product {requested}, inventory answered for {returned}"
        )))
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    #[instrument(skip(self))]
    async fn get_stock(&self, product_id: ProductId) -> Result<StockRecord, CartError> {
        let stock: StockRecord = self.fetch(&format!("stock/{product_id}")).await?;
        ensure_same_product(product_id, stock.id)?;
        debug!(amount = stock.amount, "Fetched stock");
        Ok(StockRecord {
            amount: stock.amount.max(0),
            ..stock
        })
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: ProductId) -> Result<ProductRecord, CartError> {
        let product: ProductRecord = self.fetch(&format!("products/{product_id}")).await?;
        ensure_same_product(product_id, product.id)?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let gateway =
            HttpInventoryGateway::new("http://inventory.local/api/", Duration::from_secs(1))
                .unwrap();

        assert_eq!(gateway.base_url(), "http://inventory.local/api");
    }

    #[test]
    fn test_ensure_same_product_rejects_mismatch() {
        let result = ensure_same_product(ProductId::new(1), ProductId::new(2));

        assert!(matches!(result, Err(CartError::FetchFailure(_))));
        assert!(ensure_same_product(ProductId::new(3), ProductId::new(3)).is_ok());
    }
}
