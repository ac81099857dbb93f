//! Prometheus metrics for API gateway calls.

use prometheus::{CounterVec, HistogramOpts, HistogramVec, IntCounter, Opts, Registry};

use crate::config::MetricsConfig;

/// Metrics for API gateway operations
#[derive(Clone)]
pub struct ApiClientMetrics {
    /// Calls by operation, method, and outcome
    pub requests_total: CounterVec,

    /// Call duration by operation and method
    pub request_duration_seconds: HistogramVec,

    /// Requests actually handed to the HTTP stack
    pub requests_issued_total: IntCounter,

    /// Actions refused before any request was built, by reason
    pub preflight_rejections_total: CounterVec,
}

impl ApiClientMetrics {
    /// Create and register the collectors
    pub fn new(registry: &Registry, config: &MetricsConfig) -> Result<Self, prometheus::Error> {
        let namespace = config.namespace.as_str();

        let requests_total = CounterVec::new(
            Opts::new("api_requests_total", "Total API calls by operation, method, and outcome")
                .namespace(namespace),
            &["operation", "method", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("api_request_duration_seconds", "Duration of API calls")
                .namespace(namespace)
                .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["operation", "method"],
        )?;

        let requests_issued_total = IntCounter::with_opts(
            Opts::new("api_requests_issued_total", "Requests sent over the network")
                .namespace(namespace),
        )?;

        let preflight_rejections_total = CounterVec::new(
            Opts::new(
                "preflight_rejections_total",
                "Actions refused locally before any request was issued",
            )
            .namespace(namespace),
            &["reason"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(requests_issued_total.clone()))?;
        registry.register(Box::new(preflight_rejections_total.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            requests_issued_total,
            preflight_rejections_total,
        })
    }

    /// Number of requests sent so far
    pub fn issued(&self) -> u64 {
        self.requests_issued_total.get()
    }
}
