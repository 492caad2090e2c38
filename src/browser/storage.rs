use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Mutex as AsyncMutex;

/// Key under which the last displayed route is persisted.
pub const LAST_PAGE_KEY: &str = "lastPage";

// persistent key-value storage that outlives a session, like localStorage.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct MemoryStateStore {
    pub items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps the items as a flat JSON object in one file, rewritten on every set.
pub struct JsonFileStateStore {
    pub path: PathBuf,
    // serializes read-modify-write cycles from concurrent navigations
    write_lock: AsyncMutex<()>,
}

impl JsonFileStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: AsyncMutex::new(()),
        }
    }

    async fn read_items(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("State file {} is corrupt", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read state file {}", self.path.display())),
        }
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.read_items().await?;
        Ok(items.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_items().await?;
        items.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&items)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("Failed to write state file {}", self.path.display()))
    }
}
