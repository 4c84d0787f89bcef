//! Shared application state.

use std::sync::Arc;

use storecart_cart::CartManager;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single cart this process serves.
    pub cart_manager: Arc<CartManager>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(cart_manager: Arc<CartManager>) -> Self {
        Self { cart_manager }
    }
}
