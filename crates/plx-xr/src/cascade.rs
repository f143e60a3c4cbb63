//! The fallback cascade as data.
//!
//! Each entry strategy is a [`CascadeStep`] with an applicability predicate
//! and an attempt. The runner walks the ordered list: inapplicable steps are
//! recorded as unsupported and skipped, a terminal outcome stops the walk, a
//! failed step is recorded and the walk continues, unless the error is one
//! of the user-choice halts ([`XrError::halts_cascade`]), which end the run
//! without the exhausted-cascade message.

use async_trait::async_trait;

use plx_core::{AttemptOutcome, EventSink, ImmersiveAttempt, ImmersiveStrategy, ViewerEvent};

use crate::capabilities::PlatformInfo;
use crate::error::XrError;

/// Everything one negotiation run carries between steps.
#[derive(Debug, Clone)]
pub struct NegotiationContext {
    /// Resolved (and, where applicable, authorized) model URL.
    pub model_url: String,
    /// Explicit USDZ companion URL, when the caller already has one.
    pub usdz_url: Option<String>,
    /// Bearer credential for re-authorization inside steps.
    pub credential: Option<String>,
    pub platform: PlatformInfo,
}

/// One strategy in the ordered cascade.
#[async_trait]
pub trait CascadeStep: Send + Sync {
    fn strategy(&self) -> ImmersiveStrategy;

    /// Cheap applicability predicate; inapplicable steps are skipped.
    fn applies(&self, ctx: &NegotiationContext) -> bool;

    /// Attempt entry. A terminal [`AttemptOutcome`] stops the cascade.
    ///
    /// # Errors
    ///
    /// Any [`XrError`] is recorded and the cascade continues, except the
    /// user-choice variants for which [`XrError::halts_cascade`] is true.
    async fn attempt(&self, ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError>;
}

/// Record of one finished negotiation run.
#[derive(Debug, Clone)]
pub struct NegotiationReport {
    pub attempts: Vec<ImmersiveAttempt>,
    /// Whether some step entered (or fell back into) an experience.
    pub entered: bool,
    /// Whether the run stopped on a user choice (cancel, blocked popup).
    pub halted: bool,
}

impl NegotiationReport {
    /// Whether the cascade ran out of steps with nothing to show.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        !self.entered && !self.halted
    }
}

/// Walk the cascade, reporting every step outcome to the sink.
pub async fn run_cascade(
    steps: &[Box<dyn CascadeStep>],
    ctx: &NegotiationContext,
    sink: &dyn EventSink,
) -> NegotiationReport {
    let mut attempts = Vec::with_capacity(steps.len());

    for step in steps {
        let strategy = step.strategy();

        if !step.applies(ctx) {
            record(
                sink,
                &mut attempts,
                ctx,
                ImmersiveAttempt::new(strategy, AttemptOutcome::Unsupported),
            );
            continue;
        }

        match step.attempt(ctx).await {
            Ok(outcome) => {
                record(sink, &mut attempts, ctx, ImmersiveAttempt::new(strategy, outcome));
                if outcome.is_terminal() {
                    return NegotiationReport {
                        attempts,
                        entered: true,
                        halted: false,
                    };
                }
            }
            Err(error) => {
                tracing::warn!(strategy = strategy.as_str(), %error, "cascade step failed");
                record(
                    sink,
                    &mut attempts,
                    ctx,
                    ImmersiveAttempt::new(strategy, AttemptOutcome::Error),
                );
                if error.halts_cascade() {
                    return NegotiationReport {
                        attempts,
                        entered: false,
                        halted: true,
                    };
                }
            }
        }
    }

    NegotiationReport {
        attempts,
        entered: false,
        halted: false,
    }
}

fn record(
    sink: &dyn EventSink,
    attempts: &mut Vec<ImmersiveAttempt>,
    ctx: &NegotiationContext,
    attempt: ImmersiveAttempt,
) {
    sink.record(&ViewerEvent::immersive_attempt(
        attempt,
        Some(ctx.model_url.as_str()),
    ));
    attempts.push(attempt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use plx_core::{NullSink, Platform};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStep {
        strategy: ImmersiveStrategy,
        applies: bool,
        result: fn() -> Result<AttemptOutcome, XrError>,
        attempts: AtomicUsize,
    }

    impl FixedStep {
        fn boxed(
            strategy: ImmersiveStrategy,
            applies: bool,
            result: fn() -> Result<AttemptOutcome, XrError>,
        ) -> Box<dyn CascadeStep> {
            Box::new(Self {
                strategy,
                applies,
                result,
                attempts: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CascadeStep for FixedStep {
        fn strategy(&self) -> ImmersiveStrategy {
            self.strategy
        }

        fn applies(&self, _ctx: &NegotiationContext) -> bool {
            self.applies
        }

        async fn attempt(&self, _ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    /// Sink capturing recorded events for assertions.
    #[derive(Default)]
    struct CapturingSink {
        events: Mutex<Vec<ViewerEvent>>,
    }

    impl EventSink for CapturingSink {
        fn record(&self, event: &ViewerEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn ctx() -> NegotiationContext {
        NegotiationContext {
            model_url: "https://cdn.example/chair.glb".to_string(),
            usdz_url: None,
            credential: None,
            platform: PlatformInfo {
                platform: Platform::Android,
                is_chrome: true,
                is_oculus_browser: false,
                secure_context: true,
            },
        }
    }

    #[tokio::test]
    async fn stops_at_first_entered_step() {
        let steps = vec![
            FixedStep::boxed(ImmersiveStrategy::WebXr, true, || {
                Err(XrError::Runtime("denied".to_string()))
            }),
            FixedStep::boxed(ImmersiveStrategy::SceneViewer, true, || {
                Ok(AttemptOutcome::Entered)
            }),
            FixedStep::boxed(ImmersiveStrategy::Vr360, true, || {
                Ok(AttemptOutcome::Entered)
            }),
        ];

        let report = run_cascade(&steps, &ctx(), &NullSink).await;
        assert!(report.entered);
        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.attempts[0].outcome, AttemptOutcome::Error);
        assert_eq!(report.attempts[1].strategy, ImmersiveStrategy::SceneViewer);
        assert_eq!(report.attempts[1].outcome, AttemptOutcome::Entered);
    }

    #[tokio::test]
    async fn inapplicable_steps_recorded_but_not_attempted() {
        let steps = vec![
            FixedStep::boxed(ImmersiveStrategy::QuickLook, false, || {
                Ok(AttemptOutcome::Entered)
            }),
            FixedStep::boxed(ImmersiveStrategy::SceneViewer, true, || {
                Ok(AttemptOutcome::Entered)
            }),
        ];

        let report = run_cascade(&steps, &ctx(), &NullSink).await;
        assert_eq!(report.attempts[0].outcome, AttemptOutcome::Unsupported);
        assert!(report.entered);
    }

    #[tokio::test]
    async fn exhausted_when_everything_fails() {
        let steps = vec![
            FixedStep::boxed(ImmersiveStrategy::WebXr, true, || {
                Ok(AttemptOutcome::Unsupported)
            }),
            FixedStep::boxed(ImmersiveStrategy::SceneViewer, true, || {
                Err(XrError::Gateway("intent refused".to_string()))
            }),
        ];

        let report = run_cascade(&steps, &ctx(), &NullSink).await;
        assert!(report.exhausted());
        assert_eq!(report.attempts.len(), 2);
    }

    #[tokio::test]
    async fn user_cancel_halts_without_exhaustion() {
        let steps = vec![
            FixedStep::boxed(ImmersiveStrategy::QuickLook, true, || {
                Err(XrError::Cancelled)
            }),
            FixedStep::boxed(ImmersiveStrategy::SceneViewer, true, || {
                Ok(AttemptOutcome::Entered)
            }),
        ];

        let report = run_cascade(&steps, &ctx(), &NullSink).await;
        assert!(report.halted);
        assert!(!report.entered);
        assert!(!report.exhausted());
        // The step after the halt never runs.
        assert_eq!(report.attempts.len(), 1);
    }

    #[tokio::test]
    async fn every_outcome_reaches_the_sink() {
        let sink = CapturingSink::default();
        let steps = vec![
            FixedStep::boxed(ImmersiveStrategy::WebXr, false, || {
                Ok(AttemptOutcome::Entered)
            }),
            FixedStep::boxed(ImmersiveStrategy::SceneViewer, true, || {
                Ok(AttemptOutcome::Entered)
            }),
        ];

        let report = run_cascade(&steps, &ctx(), &sink).await;
        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), report.attempts.len());
        assert!(events.iter().all(|e| e.event == "immersive_attempt"));
        assert_eq!(
            events[0].src.as_deref(),
            Some("https://cdn.example/chair.glb")
        );
    }
}
