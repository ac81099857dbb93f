//! Logging configuration.

use std::env;

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Configuration for the tracing subscriber
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "warn,patient_records_client=info".to_string(),
            service_name: "patient-records-client".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let format = match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let default_filter = env::var("LOG_DEFAULT_FILTER").unwrap_or(defaults.default_filter);

        let service_name = env::var("SERVICE_NAME").unwrap_or(defaults.service_name);

        Self {
            format,
            default_filter,
            service_name,
        }
    }
}
