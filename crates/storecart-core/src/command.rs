//! Command abstractions.

use uuid::Uuid;

use crate::product::ProductId;

/// Trait that all cart commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The product the command targets.
    fn product_id(&self) -> ProductId;
}
