//! Command handlers for the Cart context.
//!
//! Each handler validates a command against the current cart and, where the
//! operation depends on stock, a fresh inventory query. On success it returns
//! the next cart value; it never touches shared state, so a rejected command
//! leaves nothing behind.

use storecart_core::clock::Clock;
use storecart_core::error::CartError;
use storecart_core::gateway::InventoryGateway;
use storecart_core::store::{CART_RECORD_FORMAT_VERSION, PersistedCartRecord};

use crate::domain::aggregates::{Cart, CartItem, CatalogSnapshot};
use crate::domain::commands::{AddProduct, RemoveProduct, UpdateProductAmount};

/// Serializes a cart into its stored representation.
///
/// # Errors
///
/// Returns `CartError::PersistenceFailure` if item serialization fails.
pub fn to_persisted_record(cart: &Cart, clock: &dyn Clock) -> Result<PersistedCartRecord, CartError> {
    let items = serde_json::to_value(cart.items()).map_err(|e| {
        CartError::PersistenceFailure(format!("cart serialization failed: {e}"))
    })?;
    Ok(PersistedCartRecord {
        format_version: CART_RECORD_FORMAT_VERSION,
        saved_at: clock.now(),
        items,
    })
}

/// Reconstitutes a `Cart` from its stored representation.
///
/// # Errors
///
/// Returns `CartError::PersistenceFailure` if the record has an unknown
/// format version, its items cannot be decoded, or they violate the cart
/// invariants.
pub fn reconstitute(record: &PersistedCartRecord) -> Result<Cart, CartError> {
    if record.format_version != CART_RECORD_FORMAT_VERSION {
        return Err(CartError::PersistenceFailure(format!(
            "unsupported cart record format version {}",
            record.format_version
        )));
    }
    let items: Vec<CartItem> = serde_json::from_value(record.items.clone()).map_err(|e| {
        CartError::PersistenceFailure(format!("cart deserialization failed: {e}"))
    })?;
    Cart::from_items(items)
}

/// Handles the `AddProduct` command: checks live stock for one more unit and
/// either bumps the existing item or creates a new one from the catalog.
///
/// # Errors
///
/// Returns `CartError::StockExceeded` if the cart already holds every
/// available unit, or `CartError::FetchFailure` if either gateway call fails.
pub async fn handle_add_product(
    command: &AddProduct,
    cart: &Cart,
    gateway: &dyn InventoryGateway,
) -> Result<Cart, CartError> {
    let product_id = command.product_id;
    let current_amount = cart.amount_of(product_id);
    let stock = gateway.get_stock(product_id).await?;

    let desired = match current_amount.checked_add(1) {
        Some(desired) if desired <= stock.amount => desired,
        _ => {
            return Err(CartError::StockExceeded {
                product_id,
                requested: current_amount.saturating_add(1),
                available: stock.amount,
            });
        }
    };

    if current_amount > 0 {
        return cart.with_amount(product_id, desired);
    }

    let record = gateway.get_product(product_id).await?;
    Ok(cart.with_new_item(CartItem::new(product_id, CatalogSnapshot::from(record))))
}

/// Handles the `RemoveProduct` command.
///
/// # Errors
///
/// Returns `CartError::ItemNotFound` if the product is not in the cart.
pub fn handle_remove_product(command: &RemoveProduct, cart: &Cart) -> Result<Cart, CartError> {
    cart.without_item(command.product_id)
}

/// Handles the `UpdateProductAmount` command.
///
/// Returns `Ok(None)` without querying the gateway when the requested amount
/// is not positive: setting a non-positive quantity is a no-op, not a removal.
/// Stock is checked before the item is looked up.
///
/// # Errors
///
/// Returns `CartError::FetchFailure` if the stock query fails,
/// `CartError::StockExceeded` if the amount exceeds stock, or
/// `CartError::ItemNotFound` if the product is not in the cart.
pub async fn handle_update_product_amount(
    command: &UpdateProductAmount,
    cart: &Cart,
    gateway: &dyn InventoryGateway,
) -> Result<Option<Cart>, CartError> {
    if command.amount <= 0 {
        return Ok(None);
    }

    let product_id = command.product_id;
    let stock = gateway.get_stock(product_id).await?;
    if command.amount > stock.amount {
        return Err(CartError::StockExceeded {
            product_id,
            requested: command.amount,
            available: stock.amount,
        });
    }

    cart.with_amount(product_id, command.amount).map(Some)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storecart_core::error::CartError;
    use storecart_core::product::ProductId;
    use storecart_core::store::PersistedCartRecord;
    use storecart_test_support::{
        FailingInventoryGateway, FixedClock, StubInventoryGateway, fixed_now, sample_product,
    };
    use uuid::Uuid;

    use super::*;

    fn add(id: i64) -> AddProduct {
        AddProduct {
            correlation_id: Uuid::new_v4(),
            product_id: ProductId::new(id),
        }
    }

    fn update(id: i64, amount: i64) -> UpdateProductAmount {
        UpdateProductAmount {
            correlation_id: Uuid::new_v4(),
            product_id: ProductId::new(id),
            amount,
        }
    }

    fn cart_with_item(id: i64, amount: i64) -> Cart {
        let cart = Cart::new().with_new_item(CartItem::new(
            ProductId::new(id),
            CatalogSnapshot::from(sample_product(id)),
        ));
        cart.with_amount(ProductId::new(id), amount).unwrap()
    }

    #[tokio::test]
    async fn test_handle_add_product_creates_item_from_catalog() {
        // Arrange
        let gateway = StubInventoryGateway::new().with_product(sample_product(42), 3);
        let cart = Cart::new();

        // Act
        let updated = handle_add_product(&add(42), &cart, &gateway).await.unwrap();

        // Assert
        let item = updated.get(ProductId::new(42)).unwrap();
        assert_eq!(item.amount(), 1);
        assert_eq!(item.catalog(), &CatalogSnapshot::from(sample_product(42)));
        assert_eq!(gateway.stock_calls(), 1);
        assert_eq!(gateway.product_calls(), 1);
    }

    #[tokio::test]
    async fn test_handle_add_product_increments_existing_item_without_catalog_fetch() {
        // Arrange
        let gateway = StubInventoryGateway::new().with_product(sample_product(42), 3);
        let cart = cart_with_item(42, 2);

        // Act
        let updated = handle_add_product(&add(42), &cart, &gateway).await.unwrap();

        // Assert
        assert_eq!(updated.amount_of(ProductId::new(42)), 3);
        assert_eq!(gateway.product_calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_add_product_rejects_when_stock_exhausted() {
        // Arrange
        let gateway = StubInventoryGateway::new().with_product(sample_product(42), 3);
        let cart = cart_with_item(42, 3);

        // Act
        let result = handle_add_product(&add(42), &cart, &gateway).await;

        // Assert
        assert_eq!(
            result,
            Err(CartError::StockExceeded {
                product_id: ProductId::new(42),
                requested: 4,
                available: 3,
            })
        );
    }

    #[tokio::test]
    async fn test_handle_add_product_rejects_when_amount_cannot_grow() {
        // Arrange
        let gateway = StubInventoryGateway::new().with_product(sample_product(42), i64::MAX);
        let cart = cart_with_item(42, i64::MAX);

        // Act
        let result = handle_add_product(&add(42), &cart, &gateway).await;

        // Assert
        assert_eq!(
            result,
            Err(CartError::StockExceeded {
                product_id: ProductId::new(42),
                requested: i64::MAX,
                available: i64::MAX,
            })
        );
    }

    #[tokio::test]
    async fn test_handle_add_product_rejects_new_product_with_zero_stock() {
        let gateway = StubInventoryGateway::new().with_product(sample_product(5), 0);

        let result = handle_add_product(&add(5), &Cart::new(), &gateway).await;

        assert!(matches!(result, Err(CartError::StockExceeded { .. })));
        assert_eq!(gateway.product_calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_add_product_reports_fetch_failure_when_stock_unreachable() {
        let result = handle_add_product(&add(1), &Cart::new(), &FailingInventoryGateway).await;

        assert!(matches!(result, Err(CartError::FetchFailure(_))));
    }

    #[tokio::test]
    async fn test_handle_add_product_reports_fetch_failure_when_catalog_unreachable() {
        let gateway = StubInventoryGateway::new()
            .with_product(sample_product(8), 5)
            .with_broken_catalog(ProductId::new(8));

        let result = handle_add_product(&add(8), &Cart::new(), &gateway).await;

        assert!(matches!(result, Err(CartError::FetchFailure(_))));
    }

    #[test]
    fn test_handle_remove_product_removes_present_item() {
        let cart = cart_with_item(7, 2);
        let command = RemoveProduct {
            correlation_id: Uuid::new_v4(),
            product_id: ProductId::new(7),
        };

        let updated = handle_remove_product(&command, &cart).unwrap();

        assert!(updated.is_empty());
    }

    #[test]
    fn test_handle_remove_product_returns_item_not_found_for_absent_item() {
        let command = RemoveProduct {
            correlation_id: Uuid::new_v4(),
            product_id: ProductId::new(7),
        };

        let result = handle_remove_product(&command, &Cart::new());

        assert_eq!(result, Err(CartError::ItemNotFound(ProductId::new(7))));
    }

    #[tokio::test]
    async fn test_handle_update_product_amount_is_noop_for_non_positive_amounts() {
        let gateway = StubInventoryGateway::new().with_product(sample_product(1), 10);
        let cart = cart_with_item(1, 2);

        for amount in [0, -5] {
            let result = handle_update_product_amount(&update(1, amount), &cart, &gateway).await;
            assert_eq!(result, Ok(None));
        }
        assert_eq!(gateway.stock_calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_update_product_amount_sets_exact_amount() {
        let gateway = StubInventoryGateway::new().with_product(sample_product(1), 10);
        let cart = cart_with_item(1, 2);

        let updated = handle_update_product_amount(&update(1, 10), &cart, &gateway)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.amount_of(ProductId::new(1)), 10);
    }

    #[tokio::test]
    async fn test_handle_update_product_amount_rejects_amount_above_stock() {
        let gateway = StubInventoryGateway::new().with_product(sample_product(1), 4);
        let cart = cart_with_item(1, 2);

        let result = handle_update_product_amount(&update(1, 5), &cart, &gateway).await;

        assert_eq!(
            result,
            Err(CartError::StockExceeded {
                product_id: ProductId::new(1),
                requested: 5,
                available: 4,
            })
        );
    }

    #[tokio::test]
    async fn test_handle_update_product_amount_checks_stock_before_presence() {
        // Arrange: product is known to the inventory but not in the cart
        let gateway = StubInventoryGateway::new().with_product(sample_product(3), 1);

        // Act
        let over_stock = handle_update_product_amount(&update(3, 2), &Cart::new(), &gateway).await;
        let within_stock =
            handle_update_product_amount(&update(3, 1), &Cart::new(), &gateway).await;

        // Assert
        assert!(matches!(over_stock, Err(CartError::StockExceeded { .. })));
        assert_eq!(within_stock, Err(CartError::ItemNotFound(ProductId::new(3))));
    }

    #[tokio::test]
    async fn test_handle_update_product_amount_reports_fetch_failure() {
        let cart = cart_with_item(1, 1);

        let result = handle_update_product_amount(&update(1, 2), &cart, &FailingInventoryGateway).await;

        assert!(matches!(result, Err(CartError::FetchFailure(_))));
    }

    #[test]
    fn test_persisted_record_round_trips_items_in_order() {
        // Arrange
        let clock = FixedClock::default();
        let cart = cart_with_item(2, 3).with_new_item(CartItem::new(
            ProductId::new(1),
            CatalogSnapshot::from(sample_product(1)),
        ));

        // Act
        let record = to_persisted_record(&cart, &clock).unwrap();
        let restored = reconstitute(&record).unwrap();

        // Assert
        assert_eq!(record.saved_at, fixed_now());
        assert_eq!(record.format_version, CART_RECORD_FORMAT_VERSION);
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_persisted_record_layout_is_stable() {
        let record = to_persisted_record(&cart_with_item(42, 2), &FixedClock::default()).unwrap();

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["format_version"], 1);
        assert_eq!(json["items"][0]["product_id"], 42);
        assert_eq!(json["items"][0]["amount"], 2);
        assert_eq!(json["items"][0]["catalog"]["title"], "Product 42");
        assert_eq!(json["items"][0]["catalog"]["price"], "179.90");
    }

    #[test]
    fn test_high_precision_price_survives_save_and_reload() {
        // Arrange
        let catalog = CatalogSnapshot {
            title: "Precise".to_owned(),
            price: Decimal::new(1_234_567_890_123_456_789, 10),
            image: "https://images.example.com/products/5.jpg".to_owned(),
        };
        let cart = Cart::new().with_new_item(CartItem::new(ProductId::new(5), catalog));

        // Act
        let record = to_persisted_record(&cart, &FixedClock::default()).unwrap();
        let text = serde_json::to_string(&record).unwrap();
        let reloaded: PersistedCartRecord = serde_json::from_str(&text).unwrap();
        let restored = reconstitute(&reloaded).unwrap();

        // Assert
        assert_eq!(restored, cart);
        assert_eq!(
            restored.get(ProductId::new(5)).unwrap().catalog().price.to_string(),
            "123456789.0123456789"
        );
    }

    #[test]
    fn test_reconstitute_rejects_unknown_format_version() {
        let record = PersistedCartRecord {
            format_version: 99,
            saved_at: fixed_now(),
            items: serde_json::json!([]),
        };

        assert!(matches!(
            reconstitute(&record),
            Err(CartError::PersistenceFailure(_))
        ));
    }

    #[test]
    fn test_reconstitute_rejects_malformed_items() {
        let record = PersistedCartRecord {
            format_version: CART_RECORD_FORMAT_VERSION,
            saved_at: fixed_now(),
            items: serde_json::json!({ "not": "a list" }),
        };

        assert!(matches!(
            reconstitute(&record),
            Err(CartError::PersistenceFailure(_))
        ));
    }
}
