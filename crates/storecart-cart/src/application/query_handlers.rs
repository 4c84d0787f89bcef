//! Query handlers for the Cart context.
//!
//! Turns a cart snapshot into the read-only view the presentational layer
//! renders. Price formatting is left to the consumer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use storecart_core::product::ProductId;

use crate::domain::aggregates::Cart;

/// One line of the cart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    /// The product identifier.
    pub product_id: ProductId,
    /// Display title captured on first addition.
    pub title: String,
    /// Unit price captured on first addition.
    pub price: Decimal,
    /// Image reference captured on first addition.
    pub image: String,
    /// Quantity in the cart.
    pub amount: i64,
    /// `price * amount`.
    pub subtotal: Decimal,
}

/// Read-only view of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    /// Lines in insertion order.
    pub items: Vec<CartLineView>,
    /// Quantity per product, for badges next to catalog entries.
    pub amounts: BTreeMap<ProductId, i64>,
    /// Sum of all quantities.
    pub total_items: i64,
    /// Sum of all line subtotals.
    pub total: Decimal,
}

/// Builds the view for a cart snapshot.
#[must_use]
pub fn get_cart_view(cart: &Cart) -> CartView {
    let items: Vec<CartLineView> = cart
        .items()
        .iter()
        .map(|item| CartLineView {
            product_id: item.product_id(),
            title: item.catalog().title.clone(),
            price: item.catalog().price,
            image: item.catalog().image.clone(),
            amount: item.amount(),
            subtotal: item.subtotal(),
        })
        .collect();

    let amounts = items
        .iter()
        .map(|line| (line.product_id, line.amount))
        .collect();
    let total_items = items
        .iter()
        .fold(0_i64, |acc, line| acc.saturating_add(line.amount));
    let total = items
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal));

    CartView {
        items,
        amounts,
        total_items,
        total,
    }
}
