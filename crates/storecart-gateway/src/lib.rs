//! Storecart Gateway — inventory service client.
//!
//! Implements the `InventoryGateway` port over the inventory service's JSON
//! HTTP API.

pub mod http_inventory_gateway;

pub use http_inventory_gateway::HttpInventoryGateway;
