//! Application configuration structures
//!
//! Loaded by the infra layer from environment variables or a config file.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub media: MediaConfig,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    pub pool_size: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub bind_addr: String,
    /// External base URL used when building stored media URLs
    pub public_url: String,
    /// Origin allowed by the CORS layer
    pub cors_origin: String,
}

/// Media storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory stored uploads are written under
    pub dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "medlink.db".to_string(), pool_size: 8 }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            public_url: "http://localhost:3000".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { dir: "media".to_string() }
    }
}
