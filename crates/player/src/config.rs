//! Player configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use talekeeper_domain::{Language, DEFAULT_PAGE_SIZE};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default request timeout in milliseconds (2 minutes; narration can be slow)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

pub const API_URL_VAR: &str = "TALEKEEPER_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "TALEKEEPER_REQUEST_TIMEOUT_MS";
pub const PAGE_SIZE_VAR: &str = "TALEKEEPER_PAGE_SIZE";
pub const LANGUAGE_VAR: &str = "TALEKEEPER_LANGUAGE";

/// Player configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Session server base URL
    pub api_url: String,
    pub request_timeout: Duration,
    /// Turns per history page (never 0)
    pub page_size: usize,
    /// Language the narrator answers in
    pub language: Language,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            page_size: DEFAULT_PAGE_SIZE,
            language: Language::default(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup; unset keys fall back
    /// to defaults, malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = match var(REQUEST_TIMEOUT_VAR) {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("{} must be a number of milliseconds", REQUEST_TIMEOUT_VAR))?,
            ),
            None => defaults.request_timeout,
        };

        let page_size = match var(PAGE_SIZE_VAR) {
            Some(size) => size
                .parse::<usize>()
                .with_context(|| format!("{} must be a positive integer", PAGE_SIZE_VAR))?
                .max(1),
            None => defaults.page_size,
        };

        let language = match var(LANGUAGE_VAR) {
            Some(code) => code
                .parse()
                .with_context(|| format!("{} must be 'en' or 'ru'", LANGUAGE_VAR))?,
            None => defaults.language,
        };

        Ok(Self {
            api_url: var(API_URL_VAR).unwrap_or(defaults.api_url),
            request_timeout,
            page_size,
            language,
        })
    }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PlayerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn overrides_are_applied() {
        let config = PlayerConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://tales.example/api"),
            (REQUEST_TIMEOUT_VAR, "5000"),
            (PAGE_SIZE_VAR, "50"),
            (LANGUAGE_VAR, "ru"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://tales.example/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.language, Language::Ru);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = PlayerConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "0")])).unwrap();
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(PlayerConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_VAR, "soon")])).is_err());
        assert!(PlayerConfig::from_lookup(lookup(&[(LANGUAGE_VAR, "klingon")])).is_err());
    }
}
