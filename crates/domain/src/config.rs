//! Application configuration structures
//!
//! Loaded by the infra config loader from `VITAPORT_*` environment
//! variables or a `config.{json,toml}` file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the portal client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    pub api: ApiConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Query-cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// On-device storage settings
    pub storage: StorageConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the portal backend, e.g. `https://api.example-portal.com`
    pub base_url: String,
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout budget in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Total attempts per retryable request (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: default_timeout_seconds(), max_attempts: default_max_attempts() }
    }
}

/// Query-cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached query results in seconds
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Maximum number of cached query results
    #[serde(default = "default_cache_max_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl_seconds(),
            max_capacity: default_cache_max_capacity(),
        }
    }
}

/// On-device storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the credential file holding the persisted session
    pub credentials_path: PathBuf,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    3
}

fn default_cache_ttl_seconds() -> u64 {
    300
}

fn default_cache_max_capacity() -> u64 {
    1000
}
