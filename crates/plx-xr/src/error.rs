//! Immersive-path error types.
//!
//! Nothing here is terminal for the viewer: the model is already rendered
//! when these occur, so every variant is logged, recorded to the
//! observability sink, and either the cascade continues or (for the two
//! user-choice variants) stops quietly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XrError {
    /// The XR runtime rejected a query or session request (permission
    /// denied, feature unavailable, runtime crash).
    #[error("XR runtime error: {0}")]
    Runtime(String),

    /// A gateway action (anchor open, intent navigation, window open)
    /// failed.
    #[error("immersive gateway action failed: {0}")]
    Gateway(String),

    /// The browser blocked the fallback viewer popup; the user was told to
    /// allow popups. Halts the cascade until the user acts.
    #[error("popup blocked by the browser")]
    PopupBlocked,

    /// The user declined to proceed at a confirmation point. Halts the
    /// cascade without an "unsupported" message.
    #[error("cancelled by the user")]
    Cancelled,

    /// Re-authorization inside a cascade step failed.
    #[error("authorization failed: {0}")]
    Resolve(#[from] plx_resolve::ResolveError),
}

impl XrError {
    /// Whether this error stops the cascade instead of letting it continue
    /// to the next step.
    #[must_use]
    pub const fn halts_cascade(&self) -> bool {
        matches!(self, Self::PopupBlocked | Self::Cancelled)
    }
}
