//! Clock abstraction used to timestamp persisted carts.

use chrono::{DateTime, Utc};

/// Source of the current time. Injected so persisted records carry
/// reproducible timestamps under test.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation backed by `Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
