//! Storecart — Cart bounded context.
//!
//! Responsible for the line items a shopper has selected, the stock rules
//! that constrain them, and the manager that commits, persists and publishes
//! cart snapshots.

pub mod application;
pub mod domain;

pub use application::manager::{CartManager, CartOutcome};
pub use domain::aggregates::{Cart, CartItem, CatalogSnapshot};
