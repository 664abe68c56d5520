//! Configuration for BucketView
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for a BucketView instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the single store file (created if absent)
    pub db_path: PathBuf,

    /// How the store file is held between operations
    pub connection_mode: ConnectionMode,

    /// Upper bound on waiting for the store file in `PerOperation` mode
    pub acquire_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Directory served for everything that is not an API route
    pub static_dir: PathBuf,
}

/// Store connection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Open the file on every operation and close it afterwards
    #[default]
    PerOperation,

    /// Open the file once and share it across operations
    Shared,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(Self::DEFAULT_DB_FILENAME),
            connection_mode: ConnectionMode::PerOperation,
            acquire_timeout_ms: 5000,
            listen_addr: "127.0.0.1:8080".to_string(),
            static_dir: default_static_dir(),
        }
    }
}

impl Config {
    /// Store filename used when no path is given
    pub const DEFAULT_DB_FILENAME: &'static str = "store.db";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

/// `html/` next to the running executable, falling back to the working directory
fn default_static_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("html")))
        .unwrap_or_else(|| PathBuf::from("html"))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the connection mode
    pub fn connection_mode(mut self, mode: ConnectionMode) -> Self {
        self.config.connection_mode = mode;
        self
    }

    /// Set the acquisition timeout (in milliseconds)
    pub fn acquire_timeout_ms(mut self, ms: u64) -> Self {
        self.config.acquire_timeout_ms = ms;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the static asset directory
    pub fn static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.static_dir = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
