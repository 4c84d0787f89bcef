//! User-facing notifications published by the cart manager.
//!
//! A notification is emitted whenever an operation is rejected or a committed
//! cart fails to reach durable storage. Successful commits are not
//! notifications; observers see them as new snapshots.

use serde::Serialize;
use storecart_core::error::{CartError, CartErrorKind};
use storecart_core::product::ProductId;
use uuid::Uuid;

/// The manager operation a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOperation {
    /// `add_product`.
    AddProduct,
    /// `remove_product`.
    RemoveProduct,
    /// `update_product_amount`.
    UpdateProductAmount,
}

/// Structured side-channel signal describing a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartNotification {
    /// Operation that produced the notification.
    pub operation: CartOperation,
    /// Product the operation targeted.
    pub product_id: ProductId,
    /// Correlation ID of the originating command.
    pub correlation_id: Uuid,
    /// What went wrong.
    pub kind: CartErrorKind,
    /// Message suitable for showing to the shopper.
    pub message: &'static str,
}

impl CartNotification {
    /// Builds the notification for `error` raised by `operation`.
    #[must_use]
    pub fn from_error(
        operation: CartOperation,
        product_id: ProductId,
        correlation_id: Uuid,
        error: &CartError,
    ) -> Self {
        let kind = error.kind();
        Self {
            operation,
            product_id,
            correlation_id,
            kind,
            message: user_message(operation, kind),
        }
    }
}

/// Shopper-facing text for a failure.
#[must_use]
pub const fn user_message(operation: CartOperation, kind: CartErrorKind) -> &'static str {
    match (operation, kind) {
        (_, CartErrorKind::StockExceeded) => "Requested quantity is out of stock",
        (_, CartErrorKind::PersistenceFailure) => "Cart could not be saved",
        (CartOperation::AddProduct, _) => "Error adding product",
        (CartOperation::RemoveProduct, _) => "Error removing product",
        (CartOperation::UpdateProductAmount, _) => "Error changing product quantity",
    }
}
