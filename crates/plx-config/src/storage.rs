//! Object-storage configuration: bucket hosts, public CDN base, and the
//! protected-asset path convention.

use serde::{Deserialize, Serialize};

/// Default reserved path segment marking protected assets (`/model/<key>`).
fn default_protected_segment() -> String {
    String::from("model")
}

/// Default local-asset prefixes served as same-origin static content.
fn default_local_prefixes() -> Vec<String> {
    vec![String::from("/assets/")]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage-provider hostnames whose URLs are rewritten to the public
    /// base URL (e.g. `bucket.storage-provider.example`).
    #[serde(default)]
    pub bucket_hosts: Vec<String>,

    /// Public CDN base URL the bucket hosts are rewritten to. If empty,
    /// bucket-host URLs pass through unchanged.
    #[serde(default)]
    pub public_base_url: String,

    /// Root-relative prefixes treated as same-origin static assets
    /// (hero images, bundled demo models).
    #[serde(default = "default_local_prefixes")]
    pub local_asset_prefixes: Vec<String>,

    /// Reserved path segment identifying protected assets that need the
    /// signing exchange. A path containing `/{protected_segment}/<key>`
    /// requires authorization.
    #[serde(default = "default_protected_segment")]
    pub protected_segment: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_hosts: Vec::new(),
            public_base_url: String::new(),
            local_asset_prefixes: default_local_prefixes(),
            protected_segment: default_protected_segment(),
        }
    }
}

impl StorageConfig {
    /// Whether bucket-host rewriting is active.
    #[must_use]
    pub fn has_public_base(&self) -> bool {
        !self.public_base_url.is_empty()
    }

    /// Check a hostname against the configured bucket hosts
    /// (case-insensitive).
    #[must_use]
    pub fn is_bucket_host(&self, host: &str) -> bool {
        self.bucket_hosts
            .iter()
            .any(|h| h.eq_ignore_ascii_case(host))
    }
}
