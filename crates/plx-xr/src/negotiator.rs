//! User-initiated immersive entry.
//!
//! `enter` is best-effort UX, not a critical path: it always completes,
//! every step failure is swallowed after being logged and recorded, and the
//! already-rendered 3D content is never disturbed. Only a fully exhausted
//! cascade surfaces a user-visible "not supported" message.

use std::sync::Arc;

use plx_core::{
    AttemptOutcome, EventSink, ImmersiveAttempt, ImmersiveStrategy, Platform, ViewerEvent,
};
use plx_resolve::{ResolverContext, SignedUrlGate, UsdzAvailabilityApi};

use crate::capabilities::{ImmersiveGateway, PlatformInfo, UserNotifier, XrRuntime, XrSessionMode};
use crate::cascade::{CascadeStep, NegotiationContext, NegotiationReport, run_cascade};
use crate::strategies::{QuickLookStep, SceneViewerStep, Vr360Step, WebXrStep};

/// Which immersive experience the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmersiveMode {
    Ar,
    Vr,
}

/// The injected seams one negotiator instance drives.
pub struct NegotiatorServices {
    pub runtime: Arc<dyn XrRuntime>,
    pub gateway: Arc<dyn ImmersiveGateway>,
    pub notifier: Arc<dyn UserNotifier>,
    pub sink: Arc<dyn EventSink>,
    pub availability: Arc<dyn UsdzAvailabilityApi>,
    pub gate: SignedUrlGate,
}

/// Executes the ordered fallback cascade for one viewer instance.
pub struct ImmersiveSessionNegotiator {
    notifier: Arc<dyn UserNotifier>,
    sink: Arc<dyn EventSink>,
    platform: PlatformInfo,
    ar_steps: Vec<Box<dyn CascadeStep>>,
    vr_steps: Vec<Box<dyn CascadeStep>>,
}

impl ImmersiveSessionNegotiator {
    /// Wire the cascade step lists from the injected services.
    #[must_use]
    pub fn new(
        services: NegotiatorServices,
        resolver_ctx: ResolverContext,
        viewer_360_path: impl Into<String>,
        platform: PlatformInfo,
    ) -> Self {
        let NegotiatorServices {
            runtime,
            gateway,
            notifier,
            sink,
            availability,
            gate,
        } = services;

        let ar_steps: Vec<Box<dyn CascadeStep>> = vec![
            Box::new(WebXrStep::new(runtime.clone(), XrSessionMode::ImmersiveAr)),
            Box::new(QuickLookStep::new(
                availability,
                gateway.clone(),
                notifier.clone(),
                resolver_ctx.protected_segment.clone(),
            )),
            Box::new(SceneViewerStep::new(
                gate,
                resolver_ctx.clone(),
                gateway.clone(),
            )),
        ];

        let vr_steps: Vec<Box<dyn CascadeStep>> = vec![
            Box::new(WebXrStep::new(runtime, XrSessionMode::ImmersiveVr)),
            Box::new(Vr360Step::new(
                gateway,
                notifier.clone(),
                resolver_ctx.origin,
                viewer_360_path.into(),
            )),
        ];

        Self {
            notifier,
            sink,
            platform,
            ar_steps,
            vr_steps,
        }
    }

    /// Enter an immersive experience. Always completes.
    ///
    /// Cascade step failures are logged, recorded to the sink, and skipped
    /// past; only a fully exhausted cascade produces a user-visible message.
    pub async fn enter(
        &self,
        mode: ImmersiveMode,
        model_url: &str,
        usdz_url: Option<&str>,
        credential: Option<&str>,
    ) -> NegotiationReport {
        let ctx = NegotiationContext {
            model_url: model_url.to_string(),
            usdz_url: usdz_url.map(ToString::to_string),
            credential: credential.map(ToString::to_string),
            platform: self.platform,
        };

        let steps = match mode {
            ImmersiveMode::Ar => &self.ar_steps,
            ImmersiveMode::Vr => &self.vr_steps,
        };

        let mut report = run_cascade(steps, &ctx, self.sink.as_ref()).await;

        if report.exhausted() {
            let attempt =
                ImmersiveAttempt::new(ImmersiveStrategy::None, AttemptOutcome::Unsupported);
            self.sink
                .record(&ViewerEvent::immersive_attempt(attempt, Some(model_url)));
            report.attempts.push(attempt);
            self.notifier.notify(self.exhaustion_message(mode));
        }

        report
    }

    const fn exhaustion_message(&self, mode: ImmersiveMode) -> &'static str {
        match mode {
            ImmersiveMode::Ar => "AR is not supported on this device.",
            ImmersiveMode::Vr => match self.platform.platform {
                Platform::Ios | Platform::Android => {
                    "Couldn't start the 360° viewer on this device."
                }
                Platform::Desktop | Platform::Other => "VR requires a headset on this device.",
            },
        }
    }
}
