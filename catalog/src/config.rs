//! Configuration management for the Coffee Shop Catalog
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CSC_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::CatalogResult;
use crate::storage::STORAGE_KEY;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Where the catalog slot lives
    pub storage: StorageConfig,

    /// Identifier allocation for new shops
    pub ids: IdConfig,

    /// Values the presentation layer reads
    pub ui: UiConfig,

    pub images: ImageConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory for the file backend
    pub path: PathBuf,

    /// Slot name
    pub key: String,

    /// Byte quota for the memory backend
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    Uuid,
    Sequential,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdConfig {
    pub strategy: IdStrategy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Cosmetic delay before the first list load
    pub initial_load_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Advisory upload size shown to users
    pub size_hint_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub filter: String,
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> CatalogResult<Self> {
        let environment = std::env::var("CSC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CSC_ prefix)
            .add_source(
                Environment::with_prefix("CSC")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Build and deserialize a prepared builder
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> CatalogResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Builder preloaded with the default values
    pub fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("storage.backend", "file")?
            .set_default("storage.path", "data")?
            .set_default("storage.key", STORAGE_KEY)?
            .set_default("ids.strategy", "uuid")?
            .set_default("ui.initial_load_delay_ms", 300)?
            .set_default("images.size_hint_bytes", shared::IMAGE_SIZE_HINT_BYTES as u64)?
            .set_default("logging.filter", "coffee_shop_catalog=debug")?
            .set_default("logging.format", "pretty")
    }

    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.ui.initial_load_delay_ms)
    }
}
