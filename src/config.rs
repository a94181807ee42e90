//! Runtime configuration, read from the process environment (and `.env`).

use std::time::Duration;
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 350;

const API_BASE_URL_KEY: &str = "WAREHOUSE_API_BASE_URL";
const REQUEST_TIMEOUT_KEY: &str = "WAREHOUSE_REQUEST_TIMEOUT_SECS";
const DEBOUNCE_KEY: &str = "WAREHOUSE_DEBOUNCE_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub debounce_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            debounce_delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the `WAREHOUSE_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset or blank keys fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = read(API_BASE_URL_KEY)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout = match read(REQUEST_TIMEOUT_KEY) {
            Some(value) => Duration::from_secs(parse_u64(REQUEST_TIMEOUT_KEY, &value)?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let debounce_delay = match read(DEBOUNCE_KEY) {
            Some(value) => Duration::from_millis(parse_u64(DEBOUNCE_KEY, &value)?),
            None => Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        };

        Ok(Self { api_base_url, request_timeout, debounce_delay })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.debounce_delay, Duration::from_millis(350));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = Config::from_lookup(lookup(&[
            ("WAREHOUSE_API_BASE_URL", "https://api.example.com/"),
            ("WAREHOUSE_DEBOUNCE_MS", "200"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.debounce_delay, Duration::from_millis(200));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("WAREHOUSE_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "WAREHOUSE_REQUEST_TIMEOUT_SECS",
                value: "soon".into()
            }
        );
    }
}
