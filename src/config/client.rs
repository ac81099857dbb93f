//! Configuration for the patient records API client.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/v1.0";

/// Configuration for the API gateway and the controller driving it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Timeout for GET calls (in seconds)
    pub read_timeout_seconds: u64,

    /// Timeout for POST/PUT/DELETE calls (in seconds)
    pub write_timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Patients per page for the paginated list
    pub page_limit: u32,

    /// Page size used when fetching every patient for system stats
    pub stats_fetch_limit: u32,

    /// How long a notification stays visible (in seconds)
    pub notification_seconds: u64,

    /// Log every call with status and duration
    pub enable_detailed_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            read_timeout_seconds: 10,
            write_timeout_seconds: 15,
            connect_timeout_seconds: 3,
            page_limit: 10,
            stats_fetch_limit: 1000,
            notification_seconds: 5,
            enable_detailed_logging: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("PATIENT_API_BASE_URL").unwrap_or(defaults.base_url);

        let read_timeout_seconds = env::var("PATIENT_API_READ_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.read_timeout_seconds);

        let write_timeout_seconds = env::var("PATIENT_API_WRITE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.write_timeout_seconds);

        let connect_timeout_seconds = env::var("PATIENT_API_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.connect_timeout_seconds);

        // A zero page size would make the page count undefined
        let page_limit = env::var("PATIENT_API_PAGE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|limit: &u32| *limit > 0)
            .unwrap_or(defaults.page_limit);

        let stats_fetch_limit = env::var("PATIENT_API_STATS_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|limit: &u32| *limit > 0)
            .unwrap_or(defaults.stats_fetch_limit);

        let notification_seconds = env::var("PATIENT_API_NOTIFICATION_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.notification_seconds);

        let enable_detailed_logging = env::var("PATIENT_API_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enable_detailed_logging);

        Self {
            base_url,
            read_timeout_seconds,
            write_timeout_seconds,
            connect_timeout_seconds,
            page_limit,
            stats_fetch_limit,
            notification_seconds,
            enable_detailed_logging,
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_seconds)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_seconds)
    }
}
