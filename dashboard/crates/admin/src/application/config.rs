//! Application Configuration
//!
//! Configuration for the admin access layer.

use std::path::PathBuf;
use std::time::Duration;

use platform::config::{self, ConfigError, EnvSource, ProcessEnv};

/// Base URL used when `ADMIN_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
/// Token file used when `ADMIN_TOKEN_PATH` is unset
pub const DEFAULT_TOKEN_PATH: &str = ".admin_token";

/// Cache time-to-live per resource class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub clients_list: Duration,
    pub drivers_list: Duration,
    /// Orders change faster than accounts
    pub orders_list: Duration,
    pub client: Duration,
    pub driver: Duration,
    pub order: Duration,
    pub stats: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            clients_list: Duration::from_secs(15),
            drivers_list: Duration::from_secs(15),
            orders_list: Duration::from_secs(10),
            client: Duration::from_secs(60),
            driver: Duration::from_secs(60),
            order: Duration::from_secs(30),
            stats: Duration::from_secs(60),
        }
    }
}

/// Admin access layer configuration
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend base URL
    pub api_url: String,
    /// File holding the persisted session token
    pub token_path: PathBuf,
    /// Rows fetched per list when statistics are computed locally
    pub stats_fallback_limit: u32,
    /// Rows fetched per list for a CSV export
    pub export_limit: u32,
    pub ttl: CacheTtl,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            stats_fallback_limit: 1000,
            export_limit: 10_000,
            ttl: CacheTtl::default(),
        }
    }
}

impl AdminConfig {
    /// Load from the process environment
    ///
    /// Reads `ADMIN_API_URL`, `ADMIN_TOKEN_PATH`, `ADMIN_STATS_FALLBACK_LIMIT`
    /// and `ADMIN_EXPORT_LIMIT`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            api_url: config::string_or(source, "ADMIN_API_URL", DEFAULT_API_URL),
            token_path: PathBuf::from(config::string_or(
                source,
                "ADMIN_TOKEN_PATH",
                DEFAULT_TOKEN_PATH,
            )),
            stats_fallback_limit: config::parse_or(
                source,
                "ADMIN_STATS_FALLBACK_LIMIT",
                defaults.stats_fallback_limit,
            )?,
            export_limit: config::parse_or(source, "ADMIN_EXPORT_LIMIT", defaults.export_limit)?,
            ttl: defaults.ttl,
        })
    }

    /// Config for an explicit backend URL (tests, scripts)
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}
