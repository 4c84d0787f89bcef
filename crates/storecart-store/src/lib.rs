//! Storecart Store — durable storage for the persisted cart record.
//!
//! Two `CartStore` implementations: `FileCartStore` keeps one JSON file per
//! slot key in a directory, `PgCartStore` keeps one row per slot key in
//! PostgreSQL.

pub mod file_cart_store;
pub mod pg_cart_store;
pub mod schema;

pub use file_cart_store::FileCartStore;
pub use pg_cart_store::PgCartStore;
