//! Local key-value storage abstractions

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

pub const PRODUCTS_KEY: &str = "tattva_products";
pub const CART_KEY: &str = "tattva_cart";
pub const ORDERS_KEY: &str = "tattva_orders";
pub const WA_NUMBER_KEY: &str = "tattva_wa_number";

/// String key-value storage that survives between runs.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads a JSON value. Values that no longer parse are logged and treated
/// as absent so callers fall back to their defaults.
pub fn load_json<T: DeserializeOwned>(store: &dyn LocalStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        debug!("No stored value for {}", key);
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Failed to parse stored {}: {}", key, e);
            Ok(None)
        }
    }
}

pub fn save_json<T: Serialize>(store: &dyn LocalStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value).with_context(|| format!("Failed to encode {key}"))?;
    store.set(key, &raw)
}
