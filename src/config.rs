//! Configuration
//!
//! Settings are resolved from `fleet-ticket.toml` (or `.yaml`/`.json`) in
//! the working directory, overridden by `FLEET_TICKET_*` environment
//! variables. Everything has a default so the CLI works out of the box.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory holding tickets and catalogs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".fleet-ticket")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration, falling back to defaults when nothing is present
    pub fn load_or_default() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("fleet-ticket").required(false))
            .add_source(
                config::Environment::with_prefix("FLEET_TICKET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
