pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::storage::LocalStore;
use anyhow::Result;
use disk::DiskStore;

/// Opens the disk store under the configured data directory.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn LocalStore>> {
    let path = config.default_data_path()?.join("store");
    Ok(Box::new(DiskStore::open(&path)?))
}
