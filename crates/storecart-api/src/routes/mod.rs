//! Route modules.

pub mod cart;
pub mod health;
