//! Native WebXR session entry, shared by the AR and VR cascades.

use std::sync::Arc;

use async_trait::async_trait;

use plx_core::{AttemptOutcome, ImmersiveStrategy};

use crate::capabilities::{XrRuntime, XrSessionMode};
use crate::cascade::{CascadeStep, NegotiationContext};
use crate::error::XrError;

/// Attempt a native immersive session.
///
/// Support is re-queried at attempt time even when an earlier probe said
/// yes: permissions can be revoked between probe and click.
pub struct WebXrStep {
    runtime: Arc<dyn XrRuntime>,
    mode: XrSessionMode,
}

impl WebXrStep {
    #[must_use]
    pub fn new(runtime: Arc<dyn XrRuntime>, mode: XrSessionMode) -> Self {
        Self { runtime, mode }
    }
}

#[async_trait]
impl CascadeStep for WebXrStep {
    fn strategy(&self) -> ImmersiveStrategy {
        ImmersiveStrategy::WebXr
    }

    fn applies(&self, _ctx: &NegotiationContext) -> bool {
        self.runtime.available()
    }

    async fn attempt(&self, _ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError> {
        if !self.runtime.is_session_supported(self.mode).await? {
            return Ok(AttemptOutcome::Unsupported);
        }
        self.runtime.request_session(self.mode).await?;
        Ok(AttemptOutcome::Entered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plx_core::Platform;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::capabilities::PlatformInfo;

    struct CountingRuntime {
        available: bool,
        supported: bool,
        session_ok: bool,
        support_queries: AtomicUsize,
    }

    #[async_trait]
    impl XrRuntime for CountingRuntime {
        fn available(&self) -> bool {
            self.available
        }

        async fn is_session_supported(&self, _mode: XrSessionMode) -> Result<bool, XrError> {
            self.support_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.supported)
        }

        async fn request_session(&self, _mode: XrSessionMode) -> Result<(), XrError> {
            if self.session_ok {
                Ok(())
            } else {
                Err(XrError::Runtime("permission denied".to_string()))
            }
        }
    }

    fn ctx() -> NegotiationContext {
        NegotiationContext {
            model_url: "/model/u1/chair.glb".to_string(),
            usdz_url: None,
            credential: None,
            platform: PlatformInfo {
                platform: Platform::Desktop,
                is_chrome: true,
                is_oculus_browser: false,
                secure_context: true,
            },
        }
    }

    #[tokio::test]
    async fn enters_when_supported() {
        let runtime = Arc::new(CountingRuntime {
            available: true,
            supported: true,
            session_ok: true,
            support_queries: AtomicUsize::new(0),
        });
        let step = WebXrStep::new(runtime.clone(), XrSessionMode::ImmersiveAr);

        assert!(step.applies(&ctx()));
        let outcome = step.attempt(&ctx()).await.unwrap();
        assert_eq!(outcome, AttemptOutcome::Entered);
        // Re-verified at attempt time.
        assert_eq!(runtime.support_queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsupported_mode_is_not_an_error() {
        let runtime = Arc::new(CountingRuntime {
            available: true,
            supported: false,
            session_ok: true,
            support_queries: AtomicUsize::new(0),
        });
        let step = WebXrStep::new(runtime, XrSessionMode::ImmersiveVr);

        let outcome = step.attempt(&ctx()).await.unwrap();
        assert_eq!(outcome, AttemptOutcome::Unsupported);
    }

    #[tokio::test]
    async fn denied_session_is_an_error() {
        let runtime = Arc::new(CountingRuntime {
            available: true,
            supported: true,
            session_ok: false,
            support_queries: AtomicUsize::new(0),
        });
        let step = WebXrStep::new(runtime, XrSessionMode::ImmersiveAr);

        let err = step.attempt(&ctx()).await.unwrap_err();
        assert!(matches!(err, XrError::Runtime(_)));
        assert!(!err.halts_cascade());
    }

    #[tokio::test]
    async fn does_not_apply_without_runtime() {
        let runtime = Arc::new(CountingRuntime {
            available: false,
            supported: true,
            session_ok: true,
            support_queries: AtomicUsize::new(0),
        });
        let step = WebXrStep::new(runtime, XrSessionMode::ImmersiveAr);
        assert!(!step.applies(&ctx()));
    }
}
