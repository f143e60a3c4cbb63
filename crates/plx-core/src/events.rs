//! Fire-and-forget observability events.
//!
//! Every cascade step, signing fallback, and probe result is reported as a
//! [`ViewerEvent`] through an [`EventSink`]. Recording must never block or
//! fail the user-facing action: sinks are infallible by contract, and any
//! internal delivery failure is theirs to swallow.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ImmersiveAttempt;

/// One observability event from the viewer subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewerEvent {
    /// Event name, e.g. `immersive_attempt`, `signing_fallback`.
    pub event: String,
    /// Asset source or URL the event concerns, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Arbitrary structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ViewerEvent {
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            src: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Build the standard event for one cascade step outcome.
    #[must_use]
    pub fn immersive_attempt(attempt: ImmersiveAttempt, src: Option<&str>) -> Self {
        let mut event = Self::new("immersive_attempt").with_detail(serde_json::json!({
            "strategy": attempt.strategy.as_str(),
            "outcome": attempt.outcome.as_str(),
        }));
        if let Some(src) = src {
            event = event.with_src(src);
        }
        event
    }
}

/// Sink for viewer observability events.
///
/// Implementations must be cheap and infallible; callers fire and forget.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &ViewerEvent);
}

/// Default sink: structured `tracing` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ViewerEvent) {
        tracing::info!(
            event = %event.event,
            src = event.src.as_deref().unwrap_or(""),
            detail = %event
                .detail
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            "viewer event",
        );
    }
}

/// Sink that drops everything. Useful in tests that assert on behavior, not
/// telemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &ViewerEvent) {}
}
