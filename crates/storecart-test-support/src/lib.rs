//! Shared test doubles and utilities for the Storecart cart service.

mod clock;
mod gateway;
mod store;

pub use clock::{FixedClock, fixed_now};
pub use gateway::{FailingInventoryGateway, StubInventoryGateway, sample_product};
pub use store::{EmptyCartStore, FailingCartStore, RecordingCartStore};
