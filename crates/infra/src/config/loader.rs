//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the environment is not configured, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MEDLINK_DB_PATH`: Database file path (marks the environment as
//!   configured; the rest fall back to defaults when unset)
//! - `MEDLINK_DB_POOL_SIZE`: Connection pool size
//! - `MEDLINK_BIND_ADDR`: HTTP listener address
//! - `MEDLINK_PUBLIC_URL`: External base URL for stored media
//! - `MEDLINK_CORS_ORIGIN`: Allowed CORS origin
//! - `MEDLINK_MEDIA_DIR`: Directory uploads are stored under
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./medlink.json` or `./medlink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use medlink_domain::constants::DEFAULT_TIMEZONE;
use medlink_domain::{Config, DatabaseConfig, MediaConfig, PortalError, Result, ServerConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the environment is
/// not configured, falls back to loading from a config file.
///
/// # Errors
/// Returns `PortalError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `MEDLINK_DB_PATH` must be present; every other variable falls back to its
/// default when unset.
///
/// # Errors
/// Returns `PortalError::Config` if `MEDLINK_DB_PATH` is missing or any
/// present variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("MEDLINK_DB_PATH")?;

    let defaults = Config::default();
    let pool_size = match std::env::var("MEDLINK_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| PortalError::Config(format!("Invalid pool size: {e}")))?,
        Err(_) => defaults.database.pool_size,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        server: ServerConfig {
            bind_addr: env_or("MEDLINK_BIND_ADDR", defaults.server.bind_addr),
            public_url: env_or("MEDLINK_PUBLIC_URL", defaults.server.public_url),
            cors_origin: env_or("MEDLINK_CORS_ORIGIN", defaults.server.cors_origin),
        },
        media: MediaConfig { dir: env_or("MEDLINK_MEDIA_DIR", defaults.media.dir) },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PortalError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PortalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PortalError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PortalError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PortalError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PortalError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PortalError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent directories and
/// the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("medlink.json"),
            cwd.join("medlink.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("medlink.json"),
                exe_dir.join("medlink.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// The timezone stamped onto new doctor records, from the server's `TZ`
/// environment, falling back to UTC.
pub fn server_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
}

/// Get required environment variable
///
/// # Errors
/// Returns `PortalError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PortalError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Environment variable with fallback
fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    // Serializes tests that touch process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "MEDLINK_DB_PATH",
            "MEDLINK_DB_POOL_SIZE",
            "MEDLINK_BIND_ADDR",
            "MEDLINK_PUBLIC_URL",
            "MEDLINK_CORS_ORIGIN",
            "MEDLINK_MEDIA_DIR",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn env_config_requires_db_path() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().expect_err("missing db path should fail");
        assert!(matches!(err, PortalError::Config(_)));
    }

    #[test]
    fn env_config_fills_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("MEDLINK_DB_PATH", "/tmp/medlink-test.db");
        std::env::set_var("MEDLINK_DB_POOL_SIZE", "3");

        let config = load_from_env().expect("config loads");
        assert_eq!(config.database.path, "/tmp/medlink-test.db");
        assert_eq!(config.database.pool_size, 3);
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);

        clear_env();
    }

    #[test]
    fn invalid_pool_size_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("MEDLINK_DB_PATH", "/tmp/medlink-test.db");
        std::env::set_var("MEDLINK_DB_POOL_SIZE", "many");

        let err = load_from_env().expect_err("bad pool size should fail");
        assert!(matches!(err, PortalError::Config(_)));

        clear_env();
    }

    #[test]
    fn json_config_file_round_trips() {
        let mut file = NamedTempFile::with_suffix(".json").expect("temp file");
        write!(
            file,
            r#"{{"database": {{"path": "from-file.db", "pool_size": 2}}, "server": {{}}, "media": {{"dir": "stored"}}}}"#
        )
        .expect("write config");

        let config = load_from_file(Some(file.path().to_path_buf())).expect("config loads");
        assert_eq!(config.database.path, "from-file.db");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.media.dir, "stored");
        // Unlisted sections fall back to defaults.
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn toml_config_file_round_trips() {
        let mut file = NamedTempFile::with_suffix(".toml").expect("temp file");
        write!(
            file,
            "[database]\npath = \"from-toml.db\"\n\n[server]\nbind_addr = \"0.0.0.0:9000\"\n"
        )
        .expect("write config");

        let config = load_from_file(Some(file.path().to_path_buf())).expect("config loads");
        assert_eq!(config.database.path, "from-toml.db");
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_from_file(Some(PathBuf::from("/definitely/not/here.toml")))
            .expect_err("missing file should fail");
        assert!(matches!(err, PortalError::Config(_)));
    }

    #[test]
    fn server_timezone_falls_back_to_utc() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        let saved = std::env::var("TZ").ok();
        std::env::remove_var("TZ");

        assert_eq!(server_timezone(), DEFAULT_TIMEZONE);

        std::env::set_var("TZ", "Asia/Kolkata");
        assert_eq!(server_timezone(), "Asia/Kolkata");

        match saved {
            Some(tz) => std::env::set_var("TZ", tz),
            None => std::env::remove_var("TZ"),
        }
    }
}
