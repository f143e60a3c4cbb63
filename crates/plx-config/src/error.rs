//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// Protected-asset viewing was requested but the signing endpoint is not
    /// configured.
    #[error("signing endpoint not configured; set endpoints.signing_url or PARALLAX_ENDPOINTS__SIGNING_URL")]
    SigningEndpointMissing,

    /// The configured origin is empty or not an absolute URL.
    #[error("invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}
