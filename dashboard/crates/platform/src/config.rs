//! Environment Configuration Helpers
//!
//! Typed reads of environment variables. Lookups go through [`EnvSource`]
//! so configuration can be built from a fixed map in tests.

use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Error when an environment variable holds an unusable value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Source of configuration variables
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Trimmed value of `key`; blank values count as unset
pub fn optional(source: &impl EnvSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn string_or(source: &impl EnvSource, key: &str, default: &str) -> String {
    optional(source, key).unwrap_or_else(|| default.to_string())
}

/// Parse `key` as `T`, falling back to `default` when unset
///
/// A set but unparsable value is an error rather than a silent default.
pub fn parse_or<T>(source: &impl EnvSource, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(source, key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
            value,
        }),
    }
}
