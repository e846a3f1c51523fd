use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// Per-client metrics. Each client owns its own registry so several clients
/// in one process never collide; export it with [`Metrics::registry`].
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Auth metrics
    pub auth_exchanges: IntCounter,
    pub auth_failures: IntCounter,
    pub token_expiry_unix: IntGauge,

    // Registry metrics
    pub registry_requests: IntCounterVec,
    pub registry_failures: IntCounterVec,
    pub request_duration: HistogramVec,

    // Decoder metrics
    pub decode_failures: IntCounterVec,
    pub attachments_decoded: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("virre".into()), None)?;

        let metrics = Self {
            // Auth
            auth_exchanges: IntCounter::new("auth_exchanges_total", "Token requests sent to the auth server")?,
            auth_failures: IntCounter::new("auth_failures_total", "Failed token requests")?,
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Expiry timestamp of the cached token")?,

            // Registry
            registry_requests: IntCounterVec::new(Opts::new("registry_requests_total", "Registry requests by operation"), &["operation"])?,
            registry_failures: IntCounterVec::new(Opts::new("registry_failures_total", "Registry failures by operation and reason"), &["operation", "reason"])?,
            request_duration: HistogramVec::new(HistogramOpts::new("request_duration_seconds", "Http call duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0, 60.0, 120.0]), &["operation"])?,

            // Decoder
            decode_failures: IntCounterVec::new(Opts::new("decode_failures_total", "Statements decode failures by reason"), &["reason"])?,
            attachments_decoded: IntCounter::new("attachments_decoded_total", "Attachments returned from statements responses")?,

            registry,
        };

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.auth_exchanges.clone()))?;
        reg.register(Box::new(metrics.auth_failures.clone()))?;
        reg.register(Box::new(metrics.token_expiry_unix.clone()))?;
        reg.register(Box::new(metrics.registry_requests.clone()))?;
        reg.register(Box::new(metrics.registry_failures.clone()))?;
        reg.register(Box::new(metrics.request_duration.clone()))?;
        reg.register(Box::new(metrics.decode_failures.clone()))?;
        reg.register(Box::new(metrics.attachments_decoded.clone()))?;

        Ok(metrics)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
