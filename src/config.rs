//! Runtime configuration.
//!
//! Host, port, and cache directory are required startup parameters supplied
//! on the command line; the database location comes from the environment.

use anyhow::Result;
use std::path::PathBuf;

/// Environment variable naming the SQLite database file.
pub const DB_ENV_VAR: &str = "STOCKPILE_DB";

/// Database location used when `STOCKPILE_DB` is not set.
const DEFAULT_DB_PATH: &str = "stockpile.db";

/// Server configuration: bind address and blob cache directory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
}

/// Database configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    /// Read the database location from `STOCKPILE_DB`, falling back to
    /// `stockpile.db` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(DB_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
        Self { path }
    }
}

/// Full runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Validate configuration before startup.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }
        Ok(())
    }
}
