use crate::core::catalog::StoreItem;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_MERCHANT_NAME: &str = "Ambs Tattva Store";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_merchant_name")]
    pub merchant_name: String,
    pub whatsapp_number: Option<String>,
    /// Catalog used until products are edited from the admin commands.
    #[serde(default)]
    pub products: Vec<StoreItem>,
}

fn default_merchant_name() -> String {
    DEFAULT_MERCHANT_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            merchant_name: default_merchant_name(),
            whatsapp_number: None,
            products: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiProviderConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_gemini_api_key_env")]
    pub api_key_env: String,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_gemini_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        GeminiProviderConfig {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            api_key_env: default_gemini_api_key_env(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub gemini: Option<GeminiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            gemini: Some(GeminiProviderConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Overrides the detected locale.
    pub locale: Option<String>,
    /// Overrides the detected time zone.
    pub timezone: Option<String>,
    /// Rate overrides, units per one INR.
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when it does not
    /// exist yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "ambs", "tattva")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "ambs", "tattva")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
