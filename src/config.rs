//! Configuration management for LiteBox
//!
//! Values come from built-in defaults, then `config.toml` if present, then
//! `LITEBOX_*` environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::PathBuf;

use crate::storage::ListingOptions;

pub const DEFAULT_CONFIG_PATH: &str = "config";
pub const ENV_PREFIX: &str = "LITEBOX";

/// Store configuration, fixed for the lifetime of the process
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding every stored file and folder
    /// Environment: LITEBOX_STORAGE_ROOT
    pub storage_root: String,

    /// Sort listings by name instead of enumeration order
    /// Environment: LITEBOX_SORT_LISTING
    pub sort_listing: bool,
}

impl StoreConfig {
    /// Load configuration from ./config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from `path` (extension optional) with environment overrides.
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("storage_root", "./storage")?
            .set_default("sort_listing", false)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_root.trim().is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }
        Ok(())
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            sort_by_name: self.sort_listing,
        }
    }
}
