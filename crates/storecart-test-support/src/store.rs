//! Test stores — mock `CartStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storecart_core::error::CartError;
use storecart_core::store::{CartStore, PersistedCartRecord};

/// An in-memory cart store that records every `save` call.
///
/// `load` returns the most recently saved record, or the seed record passed
/// to [`RecordingCartStore::with_record`] if nothing was saved yet.
#[derive(Debug, Default)]
pub struct RecordingCartStore {
    slot: Mutex<Option<PersistedCartRecord>>,
    saved: Mutex<Vec<(String, PersistedCartRecord)>>,
}

impl RecordingCartStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording store whose slot already holds `record`.
    #[must_use]
    pub fn with_record(record: PersistedCartRecord) -> Self {
        Self {
            slot: Mutex::new(Some(record)),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all `(key, record)` pairs that were saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_records(&self) -> Vec<(String, PersistedCartRecord)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartStore for RecordingCartStore {
    async fn load(&self, _key: &str) -> Result<Option<PersistedCartRecord>, CartError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, key: &str, record: &PersistedCartRecord) -> Result<(), CartError> {
        *self.slot.lock().unwrap() = Some(record.clone());
        self.saved
            .lock()
            .unwrap()
            .push((key.to_owned(), record.clone()));
        Ok(())
    }
}

/// A cart store with an always-empty slot that silently accepts saves.
#[derive(Debug)]
pub struct EmptyCartStore;

#[async_trait]
impl CartStore for EmptyCartStore {
    async fn load(&self, _key: &str) -> Result<Option<PersistedCartRecord>, CartError> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _record: &PersistedCartRecord) -> Result<(), CartError> {
        Ok(())
    }
}

/// A cart store that always returns a persistence error. Useful for testing
/// the degraded-durability paths.
#[derive(Debug)]
pub struct FailingCartStore;

#[async_trait]
impl CartStore for FailingCartStore {
    async fn load(&self, _key: &str) -> Result<Option<PersistedCartRecord>, CartError> {
        Err(CartError::PersistenceFailure("disk unavailable".into()))
    }

    async fn save(&self, _key: &str, _record: &PersistedCartRecord) -> Result<(), CartError> {
        Err(CartError::PersistenceFailure("disk unavailable".into()))
    }
}
