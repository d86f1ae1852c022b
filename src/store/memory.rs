use crate::core::storage::LocalStore;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory local storage, lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .inner
            .read()
            .map_err(|e| anyhow!("Store lock poisoned: {e}"))?;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {}", key);
        } else {
            debug!("Store MISS for key: {}", key);
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {e}"))?;
        debug!("Store PUT for key: {}", key);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {e}"))?;
        map.remove(key);
        debug!("Store REMOVE for key: {}", key);
        Ok(())
    }
}
