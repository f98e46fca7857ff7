//! String key-value store with optional file persistence.

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Key-value store holding string values, like a browser's local storage.
///
/// Every write is flushed to the backing file (if any) before returning.
#[derive(Clone)]
pub struct Store {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open a file-backed store, starting empty if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if fs::try_exists(&path).await? {
            let data = fs::read(&path).await?;
            let entries: BTreeMap<String, String> = serde_json::from_slice(&data)
                .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;
            info!("Loaded store with {} keys from {:?}", entries.len(), path);
            entries
        } else {
            info!("Store file not found at {:?}, starting empty", path);
            BTreeMap::new()
        };

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path: Some(path),
        })
    }

    /// In-memory store; nothing survives the process.
    pub fn memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&entries).await {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Remove a key, returning whether it was present.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        let Some(old) = entries.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.flush(&entries).await {
            entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(true)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Write the whole map atomically via a temp file and rename.
    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let data = serde_json::to_vec_pretty(entries)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, path).await?;

        debug!("Saved store ({} bytes) to {:?}", data.len(), path);
        Ok(())
    }
}
