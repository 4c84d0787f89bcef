//! The cart state manager.
//!
//! Owns the canonical cart and is its only writer. Mutations are serialized
//! behind an async mutex held for the whole validate → mutate → publish →
//! persist sequence, so a command never observes another command's half-way
//! state and saves reach the store in commit order. Observers see a new
//! snapshot as soon as it is committed, before the save completes.

use std::sync::Arc;

use storecart_core::clock::Clock;
use storecart_core::command::Command;
use storecart_core::error::CartError;
use storecart_core::gateway::InventoryGateway;
use storecart_core::product::ProductId;
use storecart_core::store::{CART_STORAGE_KEY, CartStore};
use tokio::sync::{Mutex, broadcast, watch};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    handle_add_product, handle_remove_product, handle_update_product_amount, reconstitute,
    to_persisted_record,
};
use crate::domain::aggregates::Cart;
use crate::domain::commands::{AddProduct, RemoveProduct, UpdateProductAmount};
use crate::domain::notifications::{CartNotification, CartOperation};

/// Capacity of the notification channel. Receivers that fall further behind
/// lose the oldest notifications.
const NOTIFICATION_CAPACITY: usize = 64;

/// Result of an operation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new cart was committed.
    Committed(Arc<Cart>),
    /// The operation was a no-op; the current cart is returned.
    Unchanged(Arc<Cart>),
}

impl CartOutcome {
    /// The cart after the operation.
    #[must_use]
    pub fn cart(&self) -> &Arc<Cart> {
        match self {
            Self::Committed(cart) | Self::Unchanged(cart) => cart,
        }
    }

    /// Returns `true` if a new cart was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Owns the canonical cart and exposes it as immutable snapshots.
pub struct CartManager {
    state: Mutex<Arc<Cart>>,
    snapshots: watch::Sender<Arc<Cart>>,
    notifications: broadcast::Sender<CartNotification>,
    gateway: Arc<dyn InventoryGateway>,
    store: Arc<dyn CartStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("snapshot", &*self.snapshots.borrow())
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Creates a manager seeded from the store.
    ///
    /// A missing record yields an empty cart. So does a record that cannot be
    /// read or decoded: a corrupt slot is logged and ignored, never fatal.
    pub async fn load(
        gateway: Arc<dyn InventoryGateway>,
        store: Arc<dyn CartStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cart = match store.load(CART_STORAGE_KEY).await {
            Ok(Some(record)) => match reconstitute(&record) {
                Ok(cart) => {
                    info!(items = cart.len(), "Restored cart from storage");
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Stored cart is corrupt, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Could not read stored cart, starting empty");
                Cart::new()
            }
        };
        Self::with_cart(cart, gateway, store, clock)
    }

    /// Creates a manager around an existing cart without reading the store.
    #[must_use]
    pub fn with_cart(
        cart: Cart,
        gateway: Arc<dyn InventoryGateway>,
        store: Arc<dyn CartStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cart = Arc::new(cart);
        let (snapshots, _) = watch::channel(Arc::clone(&cart));
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            state: Mutex::new(cart),
            snapshots,
            notifications,
            gateway,
            store,
            clock,
        }
    }

    /// The latest committed cart.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Subscribes to committed snapshots. The receiver always holds the latest
    /// one; intermediate snapshots may be skipped by slow observers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.snapshots.subscribe()
    }

    /// Subscribes to failure notifications.
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<CartNotification> {
        self.notifications.subscribe()
    }

    /// Adds one unit of a product, creating its item if needed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockExceeded` or `CartError::FetchFailure`; the
    /// cart is unchanged and a notification is published.
    pub async fn add_product(&self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let command = AddProduct {
            correlation_id: Uuid::new_v4(),
            product_id,
        };
        self.execute_add_product(&command).await
    }

    /// Removes a product's item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound`; the cart is unchanged and a
    /// notification is published.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let command = RemoveProduct {
            correlation_id: Uuid::new_v4(),
            product_id,
        };
        self.execute_remove_product(&command).await
    }

    /// Sets the quantity of a product already in the cart. Non-positive
    /// amounts are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockExceeded`, `CartError::ItemNotFound` or
    /// `CartError::FetchFailure`; the cart is unchanged and a notification is
    /// published.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartOutcome, CartError> {
        let command = UpdateProductAmount {
            correlation_id: Uuid::new_v4(),
            product_id,
            amount,
        };
        self.execute_update_product_amount(&command).await
    }

    /// Executes an `AddProduct` command.
    ///
    /// # Errors
    ///
    /// See [`CartManager::add_product`].
    #[instrument(skip(self), fields(product_id = %command.product_id, correlation_id = %command.correlation_id))]
    pub async fn execute_add_product(&self, command: &AddProduct) -> Result<CartOutcome, CartError> {
        let mut state = self.state.lock().await;
        match handle_add_product(command, &state, self.gateway.as_ref()).await {
            Ok(cart) => Ok(self.commit(&mut state, cart, CartOperation::AddProduct, command).await),
            Err(e) => Err(self.reject(CartOperation::AddProduct, command, e)),
        }
    }

    /// Executes a `RemoveProduct` command.
    ///
    /// # Errors
    ///
    /// See [`CartManager::remove_product`].
    #[instrument(skip(self), fields(product_id = %command.product_id, correlation_id = %command.correlation_id))]
    pub async fn execute_remove_product(
        &self,
        command: &RemoveProduct,
    ) -> Result<CartOutcome, CartError> {
        let mut state = self.state.lock().await;
        match handle_remove_product(command, &state) {
            Ok(cart) => Ok(self
                .commit(&mut state, cart, CartOperation::RemoveProduct, command)
                .await),
            Err(e) => Err(self.reject(CartOperation::RemoveProduct, command, e)),
        }
    }

    /// Executes an `UpdateProductAmount` command.
    ///
    /// # Errors
    ///
    /// See [`CartManager::update_product_amount`].
    #[instrument(skip(self), fields(product_id = %command.product_id, correlation_id = %command.correlation_id))]
    pub async fn execute_update_product_amount(
        &self,
        command: &UpdateProductAmount,
    ) -> Result<CartOutcome, CartError> {
        let mut state = self.state.lock().await;
        match handle_update_product_amount(command, &state, self.gateway.as_ref()).await {
            Ok(Some(cart)) => Ok(self
                .commit(&mut state, cart, CartOperation::UpdateProductAmount, command)
                .await),
            Ok(None) => Ok(CartOutcome::Unchanged(Arc::clone(&state))),
            Err(e) => Err(self.reject(CartOperation::UpdateProductAmount, command, e)),
        }
    }

    /// Replaces the canonical cart, publishes it and then persists it.
    ///
    /// A failed save is logged and notified but does not undo the commit.
    async fn commit(
        &self,
        state: &mut Arc<Cart>,
        cart: Cart,
        operation: CartOperation,
        command: &dyn Command,
    ) -> CartOutcome {
        let cart = Arc::new(cart);
        *state = Arc::clone(&cart);
        self.snapshots.send_replace(Arc::clone(&cart));

        if let Err(e) = self.persist(&cart).await {
            warn!(error = %e, command = command.command_type(), "Cart committed but not saved");
            let _ = self.notifications.send(CartNotification::from_error(
                operation,
                command.product_id(),
                command.correlation_id(),
                &e,
            ));
        }

        info!(
            command = command.command_type(),
            items = cart.len(),
            "Cart committed"
        );
        CartOutcome::Committed(cart)
    }

    async fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let record = to_persisted_record(cart, self.clock.as_ref())?;
        self.store.save(CART_STORAGE_KEY, &record).await
    }

    fn reject(&self, operation: CartOperation, command: &dyn Command, error: CartError) -> CartError {
        info!(error = %error, command = command.command_type(), "Cart command rejected");
        let _ = self.notifications.send(CartNotification::from_error(
            operation,
            command.product_id(),
            command.correlation_id(),
            &error,
        ));
        error
    }
}
