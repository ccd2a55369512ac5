//! # Client Configuration
//!
//! Settings read from the environment (after loading `.env` with
//! `dotenvy`).
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_API_URL` | `http://localhost:8000/api` |
//! | `STOREFRONT_DATA_DIR` | `.storefront` |
//! | `STOREFRONT_HTTP_TIMEOUT_SECS` | `10` |
//! | `STOREFRONT_LOG_DIR` | `logs` |
//! | `RUST_LOG` | `storefront=info,warn` |

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_LOG_FILTER: &str = "storefront=info,warn";

/// Runtime configuration for the client and its logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    /// Directory holding `storage.json`
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
    /// `EnvFilter` directive
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(".storefront"),
            http_timeout: Duration::from_secs(10),
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Failed to load .env: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or unparsable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("STOREFRONT_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            data_dir: non_empty("STOREFRONT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            http_timeout: non_empty("STOREFRONT_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            log_dir: non_empty("STOREFRONT_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: non_empty("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Path of the key-value store file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}
