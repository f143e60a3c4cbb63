//! General viewer configuration.

use serde::{Deserialize, Serialize};

/// Explicit user retries allowed before a terminal error surfaces.
const fn default_max_retry_attempts() -> u32 {
    2
}

/// HTTP timeout for the signing and availability endpoints, in seconds.
const fn default_http_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Application origin (scheme + host), used to resolve relative asset
    /// references and to build proxy/viewer URLs.
    #[serde(default)]
    pub origin: String,

    /// Cap on explicit "Retry Loading" attempts before the viewer surfaces a
    /// terminal error.
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Request timeout for consumed HTTP services.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            max_retry_attempts: default_max_retry_attempts(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.origin.is_empty());
        assert_eq!(config.max_retry_attempts, 2);
        assert_eq!(config.http_timeout_secs, 10);
    }
}
