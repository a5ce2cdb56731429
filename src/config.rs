//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::str::FromStr;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Film store configuration
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Which film store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local table, lost on shutdown
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

/// Film store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected store implementation
    pub backend: StoreBackend,
    /// Base directory for service data
    pub data_dir: String,
    /// SQLite database path or URL
    pub database_url: String,
    /// Name of the films table
    pub table: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| {
            // Default to ~/.films-api or current directory
            if let Some(home) = env::var_os("HOME") {
                format!("{}/.films-api", home.to_string_lossy())
            } else {
                ".films-api".to_string()
            }
        });

        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to in-memory store", e);
                StoreBackend::Memory
            }),
            Err(_) => StoreBackend::default(),
        };

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            store: StoreConfig {
                backend,
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| format!("{}/films.db", data_dir)),
                data_dir,
                table: env::var("FILMS_TABLE").unwrap_or_else(|_| "films".to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
