//! Commands for the Cart context.

use storecart_core::command::Command;
use storecart_core::product::ProductId;
use uuid::Uuid;

/// Command to add one unit of a product to the cart.
#[derive(Debug, Clone)]
pub struct AddProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: ProductId,
}

/// Command to remove a product's item from the cart.
#[derive(Debug, Clone)]
pub struct RemoveProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: ProductId,
}

/// Command to set the quantity of a product already in the cart.
#[derive(Debug, Clone)]
pub struct UpdateProductAmount {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: ProductId,
    /// The requested quantity. Non-positive values are a no-op.
    pub amount: i64,
}

impl Command for AddProduct {
    fn command_type(&self) -> &'static str {
        "cart.add_product"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl Command for RemoveProduct {
    fn command_type(&self) -> &'static str {
        "cart.remove_product"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl Command for UpdateProductAmount {
    fn command_type(&self) -> &'static str {
        "cart.update_product_amount"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn product_id(&self) -> ProductId {
        self.product_id
    }
}
