//! Storecart Core — shared domain abstractions.
//!
//! This crate defines the identifiers, error taxonomy and ports (inventory
//! gateway, cart store) that the cart context and its adapters depend on.
//! It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod gateway;
pub mod product;
pub mod store;
