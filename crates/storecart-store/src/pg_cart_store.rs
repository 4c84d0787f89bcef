//! `PostgreSQL` implementation of the `CartStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use storecart_core::error::CartError;
use storecart_core::store::{CartStore, PersistedCartRecord};

/// PostgreSQL-backed cart store. One row per slot key.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    /// Creates a new `PgCartStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> CartError {
    CartError::PersistenceFailure(format!("{context}: {e}"))
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn load(&self, key: &str) -> Result<Option<PersistedCartRecord>, CartError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT payload FROM cart_slots WHERE slot_key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("loading cart slot", e))?;

        row.map(|(payload,)| serde_json::from_value(payload))
            .transpose()
            .map_err(|e| storage_error("decoding cart slot", e))
    }

    async fn save(&self, key: &str, record: &PersistedCartRecord) -> Result<(), CartError> {
        let payload =
            serde_json::to_value(record).map_err(|e| storage_error("encoding cart record", e))?;

        sqlx::query(
            r"
            INSERT INTO cart_slots (slot_key, payload, saved_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (slot_key)
            DO UPDATE SET payload = EXCLUDED.payload, saved_at = EXCLUDED.saved_at
            ",
        )
        .bind(key)
        .bind(payload)
        .bind(record.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("saving cart slot", e))?;

        Ok(())
    }
}
