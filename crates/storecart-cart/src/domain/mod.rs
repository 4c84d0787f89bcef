//! Cart domain model: aggregate, commands and notifications.

pub mod aggregates;
pub mod commands;
pub mod notifications;
