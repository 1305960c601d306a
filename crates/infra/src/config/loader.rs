//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `VITAPORT_API_BASE_URL`: Origin of the portal backend (required)
//! - `VITAPORT_CREDENTIALS_PATH`: Credential file path (required)
//! - `VITAPORT_HTTP_TIMEOUT_SECONDS`: Per-request timeout (default 30)
//! - `VITAPORT_HTTP_MAX_ATTEMPTS`: Attempts per retryable request (default 3)
//! - `VITAPORT_CACHE_TTL_SECONDS`: Query-cache TTL (default 300)
//! - `VITAPORT_CACHE_MAX_CAPACITY`: Query-cache capacity (default 1000)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./vitaport.json` or `./vitaport.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use vitaport_domain::{
    ApiConfig, CacheConfig, Config, HttpConfig, Result, StorageConfig, VitaportError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `VitaportError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
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
/// `VITAPORT_API_BASE_URL` and `VITAPORT_CREDENTIALS_PATH` must be
/// present; the remaining variables fall back to defaults.
///
/// # Errors
/// Returns `VitaportError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("VITAPORT_API_BASE_URL")?;
    let credentials_path = env_var("VITAPORT_CREDENTIALS_PATH")?;

    let defaults = HttpConfig::default();
    let timeout_seconds = env_parse("VITAPORT_HTTP_TIMEOUT_SECONDS", defaults.timeout_seconds)?;
    let max_attempts = env_parse("VITAPORT_HTTP_MAX_ATTEMPTS", defaults.max_attempts)?;

    let cache_defaults = CacheConfig::default();
    let ttl_seconds = env_parse("VITAPORT_CACHE_TTL_SECONDS", cache_defaults.ttl_seconds)?;
    let max_capacity = env_parse("VITAPORT_CACHE_MAX_CAPACITY", cache_defaults.max_capacity)?;

    Ok(Config {
        api: ApiConfig { base_url },
        http: HttpConfig { timeout_seconds, max_attempts },
        cache: CacheConfig { ttl_seconds, max_capacity },
        storage: StorageConfig { credentials_path: PathBuf::from(credentials_path) },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `VitaportError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VitaportError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VitaportError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VitaportError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VitaportError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VitaportError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VitaportError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the executable
/// directory for `config.{json,toml}` and `vitaport.{json,toml}`.
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
            cwd.join("vitaport.json"),
            cwd.join("vitaport.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("vitaport.json"),
                exe_dir.join("vitaport.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        VitaportError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, falling back to a default
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| VitaportError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
