//! Application configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `treeport.toml` in the working directory, then `TREEPORT_*` environment
//! variables (`__` separates nested keys, e.g. `TREEPORT_STORE__BACKEND`).

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const DEFAULT_SERVER_PORT: i64 = 3000;
const DEFAULT_MAX_IMPORT_BYTES: i64 = 10 * 1024 * 1024;
const DEFAULT_SQLITE_URL: &str = "sqlite://treeport.db?mode=rwc";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Largest import body accepted, in bytes
    pub max_import_bytes: usize,
    /// Object store selection
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection URL used by the SQLite backend
    pub sqlite_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl AppConfig {
    /// Load configuration from defaults, `treeport.toml` and the environment
    pub fn from_env() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("treeport").required(false))
            .add_source(
                Environment::with_prefix("TREEPORT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server_port", DEFAULT_SERVER_PORT)?
            .set_default("max_import_bytes", DEFAULT_MAX_IMPORT_BYTES)?
            .set_default("store.backend", "memory")?
            .set_default("store.sqlite_url", DEFAULT_SQLITE_URL)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT as u16,
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES as usize,
            store: StoreConfig {
                backend: StoreBackend::Memory,
                sqlite_url: DEFAULT_SQLITE_URL.to_string(),
            },
        }
    }
}
