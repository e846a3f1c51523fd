//! # Virre client
//!
//! Every operation first makes sure a bearer token is cached (running the
//! password-grant exchange when it is not), then performs exactly one
//! registry call with it.

use reqwest::Url;
use tracing::{info, instrument};

use crate::cache::token::AccessToken;
use crate::cache::token_cache::TokenCache;
use crate::config::credentials::{ClientOptions, Credentials};
use crate::config::settings::ClientConfig;
use crate::decoder::statements::decode_statements;
use crate::error::{AuthError, ConfigError, RegistryRequestError, VirreError, VirreResult};
use crate::helpers::time::{get_instant, unix_seconds};
use crate::models::{FinancialPeriods, FinancialStatements, Register};
use crate::observability::metrics::Metrics;
use crate::sources::oauth2::PasswordGrantSource;
use crate::sources::registry::{self, RegistryEndpoint, RegistryResponse};
use crate::sources::FetchToken;
use crate::transport::HttpTransport;

static AUTH_LABEL: &str = "auth";

pub struct VirreClient {
    config: ClientConfig,
    transport: HttpTransport,
    source: PasswordGrantSource,
    tokens: TokenCache,
    metrics: Metrics,
}

impl VirreClient {
    /// Validate `options` and build a client with its own transport.
    /// Performs no network activity.
    pub fn new(options: ClientOptions, config: ClientConfig) -> Result<Self, ConfigError> {
        let credentials = Credentials::try_from(options)?;
        let transport = HttpTransport::from_config(&config)?;
        Self::build(credentials, config, transport)
    }

    /// Like [`VirreClient::new`] but reuses a caller-owned transport, e.g. one
    /// shared between several clients.
    pub fn with_transport(
        options: ClientOptions,
        config: ClientConfig,
        transport: HttpTransport,
    ) -> Result<Self, ConfigError> {
        let credentials = Credentials::try_from(options)?;
        Self::build(credentials, config, transport)
    }

    fn build(credentials: Credentials, config: ClientConfig, transport: HttpTransport) -> Result<Self, ConfigError> {
        Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let source = PasswordGrantSource::new(credentials, config.auth_url());
        info!(
            base_url = %config.base_url,
            auth_url = %source.auth_url,
            test_environment = config.is_test_environment(),
            "virre client created"
        );

        Ok(Self {
            config,
            transport,
            source,
            tokens: TokenCache::new(),
            metrics: Metrics::new()?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Drop the cached token so the next call authenticates again.
    pub async fn invalidate_token(&self) {
        self.tokens.invalidate().await;
    }

    /// Financial periods of one company or foundation.
    #[instrument(skip(self))]
    pub async fn get_financial_periods(&self, business_id: &str, register: Register) -> VirreResult<FinancialPeriods> {
        let endpoint = RegistryEndpoint::FinancialPeriods;
        let response = self
            .request(endpoint, &[("businessId", business_id), ("register", register.as_str())])
            .await?;

        serde_json::from_slice(&response.body).map_err(|source| {
            self.record_failure(endpoint, "invalid_body");
            RegistryRequestError::InvalidBody { operation: endpoint.operation(), source }.into()
        })
    }

    /// Financial statements of one period: JSON metadata plus attachments.
    /// Dates are `YYYY-MM-DD`.
    #[instrument(skip(self))]
    pub async fn get_financial_statements(
        &self,
        business_id: &str,
        register: Register,
        period_start_date: &str,
        period_end_date: &str,
    ) -> VirreResult<FinancialStatements> {
        let endpoint = RegistryEndpoint::FinancialStatements;
        let response = self
            .request(
                endpoint,
                &[
                    ("businessId", business_id),
                    ("register", register.as_str()),
                    ("periodStartDate", period_start_date),
                    ("periodEndDate", period_end_date),
                ],
            )
            .await?;

        match decode_statements(&response.headers, &response.body) {
            Ok(statements) => {
                self.metrics.attachments_decoded.inc_by(statements.attachments.len() as u64);
                Ok(statements)
            }
            Err(err) => {
                self.metrics.decode_failures.with_label_values(&[err.reason()]).inc();
                Err(err.into())
            }
        }
    }

    /// Token first, then the registry call.
    async fn request(&self, endpoint: RegistryEndpoint, query: &[(&str, &str)]) -> VirreResult<RegistryResponse> {
        let token = self.access_token().await?;

        let label = endpoint.label();
        self.metrics.registry_requests.with_label_values(&[label]).inc();
        let start = get_instant();
        let result = registry::get(self.transport.client(), &self.config, endpoint, &token, query).await;
        self.metrics
            .request_duration
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        result.map_err(|err| {
            let reason = match &err {
                RegistryRequestError::Status { .. } => "status",
                RegistryRequestError::Transport(e) if e.is_timeout() => "timeout",
                RegistryRequestError::Transport(_) => "transport",
                RegistryRequestError::InvalidBody { .. } => "invalid_body",
            };
            self.record_failure(endpoint, reason);
            VirreError::from(err)
        })
    }

    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        self.tokens
            .ensure_token(|| async {
                self.metrics.auth_exchanges.inc();
                let start = get_instant();
                let result = self.source.fetch_token(self.transport.client()).await;
                self.metrics
                    .request_duration
                    .with_label_values(&[AUTH_LABEL])
                    .observe(start.elapsed().as_secs_f64());

                match &result {
                    Ok(token) => self.metrics.token_expiry_unix.set(unix_seconds(token.expires_at())),
                    Err(_) => self.metrics.auth_failures.inc(),
                }
                result
            })
            .await
    }

    fn record_failure(&self, endpoint: RegistryEndpoint, reason: &str) {
        self.metrics
            .registry_failures
            .with_label_values(&[endpoint.label(), reason])
            .inc();
    }
}
