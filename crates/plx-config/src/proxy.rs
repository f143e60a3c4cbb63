//! Same-origin asset-proxy configuration.

use serde::{Deserialize, Serialize};

/// Path of the same-origin passthrough endpoint.
fn default_proxy_path() -> String {
    String::from("/asset-proxy")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Hosts whose assets are fetched through the same-origin proxy to
    /// sidestep cross-origin and content-type issues.
    #[serde(default)]
    pub host_allowlist: Vec<String>,

    /// Proxy endpoint path on the application origin.
    #[serde(default = "default_proxy_path")]
    pub path: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host_allowlist: Vec::new(),
            path: default_proxy_path(),
        }
    }
}

impl ProxyConfig {
    /// Check a hostname against the allowlist (case-insensitive).
    #[must_use]
    pub fn allows(&self, host: &str) -> bool {
        self.host_allowlist
            .iter()
            .any(|h| h.eq_ignore_ascii_case(host))
    }
}
