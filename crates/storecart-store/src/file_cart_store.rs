//! Filesystem implementation of the `CartStore` trait.
//!
//! Each slot key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! first and are renamed into place, so a crash mid-write leaves either the
//! previous record or the new one on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use storecart_core::error::CartError;
use storecart_core::store::{CartStore, PersistedCartRecord};
use tracing::debug;

/// Directory-backed cart store.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory records are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, CartError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CartError::PersistenceFailure(format!(
                "invalid slot key {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self, key: &str) -> Result<Option<PersistedCartRecord>, CartError> {
        let path = self.slot_path(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CartError::PersistenceFailure(format!(
                    "reading {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            CartError::PersistenceFailure(format!("decoding {}: {e}", path.display()))
        })
    }

    async fn save(&self, key: &str, record: &PersistedCartRecord) -> Result<(), CartError> {
        let path = self.slot_path(key)?;
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        let payload = serde_json::to_vec_pretty(record)
            .map_err(|e| CartError::PersistenceFailure(format!("encoding cart record: {e}")))?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            CartError::PersistenceFailure(format!("creating {}: {e}", self.dir.display()))
        })?;
        tokio::fs::write(&tmp_path, &payload).await.map_err(|e| {
            CartError::PersistenceFailure(format!("writing {}: {e}", tmp_path.display()))
        })?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            CartError::PersistenceFailure(format!("replacing {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), bytes = payload.len(), "Cart record written");
        Ok(())
    }
}
