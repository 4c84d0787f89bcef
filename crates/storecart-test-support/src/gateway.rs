//! Test gateways — in-memory `InventoryGateway` implementations for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use storecart_core::error::CartError;
use storecart_core::gateway::{InventoryGateway, ProductRecord, StockRecord};
use storecart_core::product::ProductId;

/// Builds a catalog record with predictable attributes for `id`.
#[must_use]
pub fn sample_product(id: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Decimal::new(17990, 2),
        image: format!("https://images.example.com/products/{id}.jpg"),
    }
}

/// A gateway backed by in-memory stock and catalog tables.
///
/// Unknown products fail with `CartError::FetchFailure`, as a not-found from
/// the real service would. Counts every call so tests can assert on the
/// number of round trips.
#[derive(Debug, Default)]
pub struct StubInventoryGateway {
    stock: Mutex<HashMap<ProductId, i64>>,
    products: Mutex<HashMap<ProductId, ProductRecord>>,
    broken_catalog: Mutex<HashSet<ProductId>>,
    stock_calls: AtomicUsize,
    product_calls: AtomicUsize,
}

impl StubInventoryGateway {
    /// Creates a gateway that knows no products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product with the given stock.
    ///
    /// # Panics
    ///
    /// Panics if an internal mutex is poisoned.
    #[must_use]
    pub fn with_product(self, record: ProductRecord, stock: i64) -> Self {
        self.stock.lock().unwrap().insert(record.id, stock);
        self.products.lock().unwrap().insert(record.id, record);
        self
    }

    /// Makes catalog lookups for `product_id` fail while stock lookups keep
    /// working.
    ///
    /// # Panics
    ///
    /// Panics if an internal mutex is poisoned.
    #[must_use]
    pub fn with_broken_catalog(self, product_id: ProductId) -> Self {
        self.broken_catalog.lock().unwrap().insert(product_id);
        self
    }

    /// Changes the stock of a product after construction.
    ///
    /// # Panics
    ///
    /// Panics if an internal mutex is poisoned.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        self.stock.lock().unwrap().insert(product_id, amount);
    }

    /// Number of `get_stock` calls served so far.
    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_product` calls served so far.
    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryGateway for StubInventoryGateway {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockRecord, CartError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.stock
            .lock()
            .unwrap()
            .get(&product_id)
            .map(|amount| StockRecord {
                id: product_id,
                amount: *amount,
            })
            .ok_or_else(|| CartError::FetchFailure(format!("stock for product {product_id} not found")))
    }

    async fn get_product(&self, product_id: ProductId) -> Result<ProductRecord, CartError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_catalog.lock().unwrap().contains(&product_id) {
            return Err(CartError::FetchFailure("catalog request timed out".into()));
        }
        self.products
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CartError::FetchFailure(format!("product {product_id} not found")))
    }
}

/// A gateway that always fails with a fetch failure. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingInventoryGateway;

#[async_trait]
impl InventoryGateway for FailingInventoryGateway {
    async fn get_stock(&self, _product_id: ProductId) -> Result<StockRecord, CartError> {
        Err(CartError::FetchFailure("connection refused".into()))
    }

    async fn get_product(&self, _product_id: ProductId) -> Result<ProductRecord, CartError> {
        Err(CartError::FetchFailure("connection refused".into()))
    }
}
