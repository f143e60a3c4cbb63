//! Advisory XR capability detection.
//!
//! Linear, no backtracking:
//! 1. no XR runtime → user-agent heuristics (Quick Look counts as AR on
//!    iOS, Scene Viewer counts on Android Chrome over HTTPS)
//! 2. runtime present → each session mode queried independently; one
//!    mode's query failure never affects the other
//! 3. iOS override: runtime says no AR → trust the native Quick Look
//!    capability check instead
//!
//! The result gates which buttons render; the negotiator re-verifies at
//! click time because support can change in between (permissions revoked,
//! headset disconnected).

use plx_core::{Platform, XrSupport};

use crate::capabilities::{ImmersiveGateway, PlatformInfo, XrRuntime, XrSessionMode};
use crate::error::XrError;

/// Capability prober for one browsing context.
pub struct XrCapabilityProbe<'a> {
    runtime: &'a dyn XrRuntime,
    gateway: &'a dyn ImmersiveGateway,
    info: PlatformInfo,
}

impl<'a> XrCapabilityProbe<'a> {
    #[must_use]
    pub const fn new(
        runtime: &'a dyn XrRuntime,
        gateway: &'a dyn ImmersiveGateway,
        info: PlatformInfo,
    ) -> Self {
        Self {
            runtime,
            gateway,
            info,
        }
    }

    /// Detect AR/VR support.
    ///
    /// # Errors
    ///
    /// Returns [`XrError`] only when the iOS Quick Look capability check
    /// itself fails; per-mode session queries are caught and reported as
    /// unsupported for that mode.
    pub async fn detect(&self) -> Result<XrSupport, XrError> {
        if !self.runtime.available() {
            return Ok(self.heuristic_support());
        }

        let ar_supported = self
            .query_mode(XrSessionMode::ImmersiveAr)
            .await;
        let vr_supported = self
            .query_mode(XrSessionMode::ImmersiveVr)
            .await;

        // iOS Safari exposes WebXR behind flags but always ships Quick Look;
        // the anchor capability check is the authoritative answer there.
        let ar_supported = if !ar_supported && self.info.platform == Platform::Ios {
            self.gateway.supports_quick_look()?
        } else {
            ar_supported
        };

        Ok(XrSupport {
            ar_supported,
            vr_supported,
            platform: self.info.platform,
        })
    }

    /// Detect, degrading optimistically.
    ///
    /// When detection itself fails, both modes are reported supported: the
    /// immersive buttons stay visible and the cascade's failure handling is
    /// the real gatekeeper. Intentional degradation, not a detection bug.
    pub async fn detect_lenient(&self) -> XrSupport {
        match self.detect().await {
            Ok(support) => support,
            Err(error) => {
                tracing::warn!(%error, "XR capability detection failed; enabling all modes");
                XrSupport::optimistic(self.info.platform)
            }
        }
    }

    async fn query_mode(&self, mode: XrSessionMode) -> bool {
        self.runtime
            .is_session_supported(mode)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(mode = mode.as_str(), %error, "session support query failed");
                false
            })
    }

    fn heuristic_support(&self) -> XrSupport {
        let ar_supported = match self.info.platform {
            // Quick Look counts as AR.
            Platform::Ios => true,
            // Scene Viewer counts, but only on Chrome over HTTPS.
            Platform::Android => self.info.is_chrome && self.info.secure_context,
            Platform::Desktop | Platform::Other => false,
        };
        XrSupport {
            ar_supported,
            vr_supported: false,
            platform: self.info.platform,
        }
    }
}
