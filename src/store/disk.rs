use crate::core::storage::LocalStore;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "local_storage";

/// Local storage kept in a fjall keyspace on disk.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened store at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl LocalStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key)? {
            Some(value) => {
                debug!("Store HIT for key: {}", key);
                Ok(Some(String::from_utf8(value.to_vec())?))
            }
            None => {
                debug!("Store MISS for key: {}", key);
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store PUT for key: {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.partition.remove(key)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store REMOVE for key: {}", key);
        Ok(())
    }
}
