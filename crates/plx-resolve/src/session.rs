//! Per-viewer authorization session.
//!
//! One `GateSession` lives for one viewer instance. It enforces the two
//! lifecycle rules the gate itself cannot see:
//!
//! - a new authorization for the viewer **supersedes** the in-flight one;
//!   the superseded request's result is never applied, so two requests for
//!   the same asset cannot race;
//! - explicit user retries draw from a small fixed [`RetryBudget`] before
//!   the terminal error surfaces.
//!
//! Dropping the session (component unmount, navigation away) cancels any
//! in-flight request via [`GateSession::cancel`].

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::error::ResolveError;
use crate::gate::{AuthorizedUrl, SignedUrlGate};
use crate::resolver::ResolvedAsset;

/// Cap on explicit user retries. Grounded in the viewer UX: "Retry Loading"
/// twice, then a terminal error.
#[derive(Debug, Clone)]
pub struct RetryBudget {
    max_attempts: u32,
    used: u32,
}

impl RetryBudget {
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            used: 0,
        }
    }

    /// Attempts left before the terminal error.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.used)
    }

    /// Consume one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::RetryExhausted`] once the cap is hit.
    pub const fn try_begin(&mut self) -> Result<(), ResolveError> {
        if self.used >= self.max_attempts {
            return Err(ResolveError::RetryExhausted {
                attempts: self.used,
            });
        }
        self.used += 1;
        Ok(())
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Superseding wrapper around [`SignedUrlGate`] for one viewer instance.
pub struct GateSession {
    gate: SignedUrlGate,
    current: Mutex<CancellationToken>,
}

impl GateSession {
    #[must_use]
    pub fn new(gate: SignedUrlGate) -> Self {
        Self {
            gate,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Authorize, superseding any in-flight authorization from this session.
    ///
    /// The superseded call resolves with [`ResolveError::Superseded`]; its
    /// network result, if any arrives later, is discarded.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Superseded`] when a newer call took over, otherwise
    /// whatever [`SignedUrlGate::authorize`] returns.
    pub async fn authorize(
        &self,
        resolved: &ResolvedAsset,
        credential: Option<&str>,
    ) -> Result<AuthorizedUrl, ResolveError> {
        let token = self.supersede();

        tokio::select! {
            () = token.cancelled() => Err(ResolveError::Superseded),
            result = self.gate.authorize(resolved, credential) => result,
        }
    }

    /// Cancel any in-flight authorization (component unmount / navigation).
    pub fn cancel(&self) {
        self.current
            .lock()
            .expect("gate session lock poisoned")
            .cancel();
    }

    /// Replace the live token, cancelling the previous one.
    fn supersede(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = {
            let mut current = self.current.lock().expect("gate session lock poisoned");
            std::mem::replace(&mut *current, token.clone())
        };
        previous.cancel();
        token
    }
}

impl Drop for GateSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
