//! Application layer: command and query handlers plus the stateful manager.

pub mod command_handlers;
pub mod manager;
pub mod query_handlers;
