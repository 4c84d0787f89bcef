//! Inventory gateway port.
//!
//! The inventory service is an external, read-only collaborator. The cart
//! only asks it two questions: how many units of a product are available, and
//! what the product's catalog attributes are.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::product::ProductId;

/// Stock level reported by the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// The product the stock belongs to.
    pub id: ProductId,
    /// Units currently available.
    pub amount: i64,
}

/// Catalog attributes of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Image reference (URL).
    pub image: String,
}

/// Read-only access to live inventory and catalog data.
///
/// Implementations must be side-effect free. Any failure, including a
/// not-found product or a timeout, is reported as `CartError::FetchFailure`.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Returns the current stock for a product.
    async fn get_stock(&self, product_id: ProductId) -> Result<StockRecord, CartError>;

    /// Returns the catalog record for a product.
    async fn get_product(&self, product_id: ProductId) -> Result<ProductRecord, CartError>;
}
