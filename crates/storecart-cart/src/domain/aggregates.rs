//! Aggregate root for the Cart context.
//!
//! A `Cart` is an immutable value. Every mutation returns a new `Cart`, so a
//! snapshot handed to an observer never changes after the fact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storecart_core::error::CartError;
use storecart_core::gateway::ProductRecord;
use storecart_core::product::ProductId;

/// Catalog attributes captured when a product first enters the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Display title.
    pub title: String,
    /// Unit price at the time of capture. Stored as a decimal string so a
    /// saved cart reloads with the exact same price.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Image reference (URL).
    pub image: String,
}

impl From<ProductRecord> for CatalogSnapshot {
    fn from(record: ProductRecord) -> Self {
        Self {
            title: record.title,
            price: record.price,
            image: record.image,
        }
    }
}

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product_id: ProductId,
    amount: i64,
    catalog: CatalogSnapshot,
}

impl CartItem {
    /// Creates an item for a product entering the cart, with an amount of 1.
    #[must_use]
    pub fn new(product_id: ProductId, catalog: CatalogSnapshot) -> Self {
        Self {
            product_id,
            amount: 1,
            catalog,
        }
    }

    /// The product this item refers to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Quantity in the cart. Always at least 1.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Catalog attributes captured on first addition.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Price of this line: unit price times amount, saturating at the
    /// bounds of `Decimal`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.catalog.price.saturating_mul(Decimal::from(self.amount))
    }

    fn with_amount(&self, amount: i64) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// The aggregate root for a shopping cart.
///
/// Items are kept in insertion order and keyed by product: no two items share
/// a `ProductId` and every amount is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from previously stored items.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PersistenceFailure` if the items violate the cart
    /// invariants (duplicate product or non-positive amount).
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        for (index, item) in items.iter().enumerate() {
            if item.amount < 1 {
                return Err(CartError::PersistenceFailure(format!(
                    "stored item for product {} has non-positive amount {}",
                    item.product_id, item.amount
                )));
            }
            if items[..index]
                .iter()
                .any(|earlier| earlier.product_id == item.product_id)
            {
                return Err(CartError::PersistenceFailure(format!(
                    "stored cart lists product {} more than once",
                    item.product_id
                )));
            }
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the item for a product.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Quantity of a product in the cart, 0 if absent.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> i64 {
        self.get(product_id).map_or(0, CartItem::amount)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a cart with `item` appended.
    ///
    /// The product must not already be in the cart; use [`Cart::with_amount`]
    /// for items that are.
    #[must_use]
    pub fn with_new_item(&self, item: CartItem) -> Self {
        debug_assert!(
            self.get(item.product_id).is_none(),
            "product {} already in cart",
            item.product_id
        );
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Returns a cart where the product's item carries `amount`.
    ///
    /// `amount` must be at least 1; callers validate it against stock first.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Result<Self, CartError> {
        debug_assert!(amount >= 1, "cart amounts are positive");
        let index = self.position(product_id)?;
        let mut items = self.items.clone();
        items[index] = self.items[index].with_amount(amount);
        Ok(Self { items })
    }

    /// Returns a cart without the product's item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    pub fn without_item(&self, product_id: ProductId) -> Result<Self, CartError> {
        let index = self.position(product_id)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self { items })
    }

    fn position(&self, product_id: ProductId) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or(CartError::ItemNotFound(product_id))
    }
}
