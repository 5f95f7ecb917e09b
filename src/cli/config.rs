//! Configuration file for `proglog serve`
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 8080 },
//!   "backend": "file",
//!   "store_path": "./data/store.log",
//!   "write_buffer_bytes": 4096
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::Event;
use crate::store::DEFAULT_BUFFER_CAPACITY;

/// Which record log the server exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Indexed in-memory list, lost on exit
    #[default]
    Memory,
    /// Length-prefixed frames in a store file
    File,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP bind address
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Record log backend (default: memory)
    #[serde(default)]
    pub backend: Backend,

    /// Store file used by the file backend
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Store write-buffer capacity in bytes
    #[serde(default = "default_write_buffer_bytes")]
    pub write_buffer_bytes: usize,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/store.log")
}

fn default_write_buffer_bytes() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            backend: Backend::default(),
            store_path: default_store_path(),
            write_buffer_bytes: default_write_buffer_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        info!(event = %Event::ConfigLoaded, path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        backend: Option<Backend>,
        store: Option<PathBuf>,
    ) -> CliResult<Self> {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(backend) = backend {
            self.backend = backend;
        }
        if let Some(store) = store {
            self.store_path = store;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate field values
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.write_buffer_bytes == 0 {
            return Err(CliError::config_error("write_buffer_bytes must be > 0"));
        }

        if self.backend == Backend::File && self.store_path.as_os_str().is_empty() {
            return Err(CliError::config_error(
                "store_path is required for the file backend",
            ));
        }

        Ok(())
    }
}
