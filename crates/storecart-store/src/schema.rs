//! Cart store database schema.

use sqlx::PgPool;

/// SQL to create the cart slots table.
pub const CREATE_CART_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS cart_slots (
    slot_key TEXT PRIMARY KEY,
    payload  JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

/// Creates the cart slots table if it does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CART_SLOTS_TABLE).execute(pool).await?;
    Ok(())
}
