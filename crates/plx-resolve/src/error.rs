//! Resolution and authorization error types.
//!
//! Only [`ResolveError::InvalidReference`], [`ResolveError::AccessDenied`],
//! [`ResolveError::NotFound`], [`ResolveError::RetryExhausted`], and
//! [`ResolveError::Superseded`] cross the viewer boundary. The transport and
//! payload variants exist so the gate can tell terminal failures apart from
//! ones it degrades into an unsigned-URL fallback.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The raw asset source is empty or unparseable. Terminal, shown inline.
    #[error("invalid asset reference: {0}")]
    InvalidReference(String),

    /// The signing endpoint rejected the credential. Terminal, prompt
    /// re-auth; never retried automatically.
    #[error("access denied for asset key '{key}' (HTTP {status})")]
    AccessDenied { key: String, status: u16 },

    /// The signing endpoint does not know the key. Terminal, "asset
    /// removed".
    #[error("asset not found: {key}")]
    NotFound { key: String },

    /// Transient signing failure (non-auth HTTP status, bad payload). The
    /// gate degrades to the unsigned URL exactly once; surfaced only if that
    /// fallback also fails to render.
    #[error("signing request failed: {0}")]
    Signing(String),

    /// HTTP transport failure reaching a consumed service.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A newer authorization for the same viewer superseded this one; its
    /// result must not be applied.
    #[error("authorization superseded by a newer request")]
    Superseded,

    /// The explicit-retry cap was hit; the viewer shows a terminal error.
    #[error("retry budget exhausted after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
}

impl ResolveError {
    /// Whether this error is terminal for the viewer (no fallback, no
    /// automatic retry).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference(_)
                | Self::AccessDenied { .. }
                | Self::NotFound { .. }
                | Self::RetryExhausted { .. }
        )
    }
}
