//! Cart error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::ProductId;

/// Errors produced by cart operations and the ports they depend on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity exceeds the live inventory.
    #[error(
        "requested quantity exceeds available stock for product {product_id}: requested {requested}, available {available}"
    )]
    StockExceeded {
        /// The product whose stock was checked.
        product_id: ProductId,
        /// The quantity the operation would have produced.
        requested: i64,
        /// The quantity the inventory reported.
        available: i64,
    },

    /// The operation referenced a product that is not in the cart.
    #[error("product {0} not found in cart")]
    ItemNotFound(ProductId),

    /// The inventory gateway could not be reached or answered unexpectedly.
    #[error("inventory fetch failed: {0}")]
    FetchFailure(String),

    /// A durable read or write of the cart record did not complete.
    #[error("cart persistence failed: {0}")]
    PersistenceFailure(String),
}

impl CartError {
    /// Returns the discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> CartErrorKind {
        match self {
            Self::StockExceeded { .. } => CartErrorKind::StockExceeded,
            Self::ItemNotFound(_) => CartErrorKind::ItemNotFound,
            Self::FetchFailure(_) => CartErrorKind::FetchFailure,
            Self::PersistenceFailure(_) => CartErrorKind::PersistenceFailure,
        }
    }
}

/// Field-less discriminant of [`CartError`], suitable for notifications and
/// wire error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartErrorKind {
    /// See [`CartError::StockExceeded`].
    StockExceeded,
    /// See [`CartError::ItemNotFound`].
    ItemNotFound,
    /// See [`CartError::FetchFailure`].
    FetchFailure,
    /// See [`CartError::PersistenceFailure`].
    PersistenceFailure,
}

impl CartErrorKind {
    /// Machine-readable code for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StockExceeded => "stock_exceeded",
            Self::ItemNotFound => "item_not_found",
            Self::FetchFailure => "fetch_failure",
            Self::PersistenceFailure => "persistence_failure",
        }
    }
}
