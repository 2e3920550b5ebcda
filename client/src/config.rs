use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_FALLBACK_URL: &str = "http://127.0.0.1:5001/api";

/// Connection settings for [`crate::ApiClient`]. Durations are milliseconds
/// so the struct can be filled straight from a JS config object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub fallback_url: String,
    pub timeout_ms: u64,
    /// Timeout for the single retry after a timed-out request
    pub retry_timeout_ms: u64,
    /// Timeout for the reachability probe of the alternate host
    pub probe_timeout_ms: u64,
    pub cache_ttl_ms: u64,
    pub probe_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            timeout_ms: 15_000,
            retry_timeout_ms: 30_000,
            probe_timeout_ms: 3_000,
            cache_ttl_ms: 30_000,
            probe_path: "/categories/test-connection".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url.into());
        self
    }

    pub fn with_fallback_url(mut self, fallback_url: impl Into<String>) -> Self {
        self.fallback_url = trim_base(fallback_url.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_timeout(&self) -> Duration {
        Duration::from_millis(self.retry_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// The host that is not `active`; the fallback unless we already switched
    pub fn alternate_of(&self, active: &str) -> &str {
        if active == self.fallback_url {
            &self.base_url
        } else {
            &self.fallback_url
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
