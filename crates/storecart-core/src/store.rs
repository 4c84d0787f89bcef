//! Cart store port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Fixed namespace key under which the cart record is stored.
pub const CART_STORAGE_KEY: &str = "storecart.cart";

/// Current layout version of [`PersistedCartRecord`].
pub const CART_RECORD_FORMAT_VERSION: u32 = 1;

/// Stored representation of a cart.
///
/// `items` holds the serialized ordered item collection; its layout is owned
/// by the cart context, the store treats it as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCartRecord {
    /// Layout version of `items`.
    pub format_version: u32,
    /// When the record was written.
    pub saved_at: DateTime<Utc>,
    /// Serialized cart items, in insertion order.
    pub items: serde_json::Value,
}

/// Durable single-slot key-value storage for cart records.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the record stored under `key`, or `None` if the slot is empty.
    ///
    /// A record that exists but cannot be decoded is an error.
    async fn load(&self, key: &str) -> Result<Option<PersistedCartRecord>, CartError>;

    /// Writes `record` under `key`, replacing whatever was there.
    async fn save(&self, key: &str, record: &PersistedCartRecord) -> Result<(), CartError>;
}
