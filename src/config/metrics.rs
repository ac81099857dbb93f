//! Metrics configuration.

use std::env;

/// Configuration for API call metrics collection
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Prefix applied to every metric name
    pub namespace: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            namespace: "patient_client".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        let namespace =
            env::var("METRICS_NAMESPACE").unwrap_or_else(|_| "patient_client".to_string());

        Self { enabled, namespace }
    }
}
