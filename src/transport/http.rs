use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::settings::ClientConfig;
use crate::error::ConfigError;
use crate::transport::dns::CachingResolver;
use crate::utils::constants::{KEEP_ALIVE_INTERVAL_SECS, POOL_IDLE_TIMEOUT_SECS};

/// Wraps the `reqwest::Client` (connection pool, keep-alive, resolver) used
/// for both the auth server and the registry.
///
/// Cloning is cheap and shares the pool. Build one from [`ClientConfig`] or
/// hand in a preconfigured client with [`HttpTransport::from_client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        builder = if config.keep_alive {
            builder
                .tcp_keepalive(Duration::from_secs(KEEP_ALIVE_INTERVAL_SECS))
                .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
        } else {
            builder.pool_max_idle_per_host(0)
        };

        if config.dns_cache {
            let ttl = Duration::from_secs(config.dns_cache_ttl_seconds);
            builder = builder.dns_resolver(Arc::new(CachingResolver::new(ttl)));
        }

        debug!(
            timeout_ms = config.timeout_ms,
            keep_alive = config.keep_alive,
            dns_cache = config.dns_cache,
            "building http transport"
        );
        builder
            .build()
            .map(|client| Self { client })
            .map_err(ConfigError::Transport)
    }

    /// Use a caller-built client as is; its timeout and pool settings apply.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_each_keep_alive_and_dns_combination() {
        for (keep_alive, dns_cache) in [(true, true), (true, false), (false, true), (false, false)] {
            let config = ClientConfig {
                keep_alive,
                dns_cache,
                ..ClientConfig::default()
            };
            assert!(HttpTransport::from_config(&config).is_ok());
        }
    }
}
