use std::time::Duration;

use serde::Deserialize;

use crate::utils::constants::{
    AUTH_URL_PRODUCTION, AUTH_URL_TEST, DEFAULT_BASE_URL, DEFAULT_DNS_CACHE_TTL_SECS,
    DEFAULT_TIMEOUT_MS, TEST_ENVIRONMENT_MARKER,
};

/// ================================
/// Client settings
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Registry base url. Use `https://rekisteripalvelut.asi.prh.fi:9193`
    /// for the test environment.
    pub base_url: String,
    /// Timeout applied to every http call, milliseconds
    pub timeout_ms: u64,
    /// Reuse connections between calls
    pub keep_alive: bool,
    pub dns_cache: bool,
    pub dns_cache_ttl_seconds: u64,
    /// Overrides the auth endpoint derived from `base_url`
    pub auth_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            keep_alive: true,
            dns_cache: true,
            dns_cache_ttl_seconds: DEFAULT_DNS_CACHE_TTL_SECS,
            auth_url: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn is_test_environment(&self) -> bool {
        self.base_url.contains(TEST_ENVIRONMENT_MARKER)
    }

    /// Token endpoint for this configuration.
    pub fn auth_url(&self) -> &str {
        match &self.auth_url {
            Some(url) => url,
            None if self.is_test_environment() => AUTH_URL_TEST,
            None => AUTH_URL_PRODUCTION,
        }
    }

    /// `base_url` joined with an absolute registry path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
