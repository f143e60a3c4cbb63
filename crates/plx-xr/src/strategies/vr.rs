//! Mobile 360° orientation-viewer fallback.

use std::sync::Arc;

use async_trait::async_trait;

use plx_core::{AttemptOutcome, ImmersiveStrategy};

use crate::capabilities::{ImmersiveGateway, PopupOutcome, UserNotifier};
use crate::cascade::{CascadeStep, NegotiationContext};
use crate::error::XrError;

/// Open the orientation-driven 360° viewer page in a new window.
///
/// Not offered inside the Oculus in-headset browser, where the native
/// session path is the only one expected to work.
pub struct Vr360Step {
    gateway: Arc<dyn ImmersiveGateway>,
    notifier: Arc<dyn UserNotifier>,
    origin: String,
    viewer_path: String,
}

impl Vr360Step {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ImmersiveGateway>,
        notifier: Arc<dyn UserNotifier>,
        origin: impl Into<String>,
        viewer_path: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            origin: origin.into(),
            viewer_path: viewer_path.into(),
        }
    }

    fn viewer_url(&self, model_url: &str) -> String {
        format!(
            "{}{}?src={}",
            self.origin.trim_end_matches('/'),
            self.viewer_path,
            urlencoding::encode(model_url),
        )
    }
}

#[async_trait]
impl CascadeStep for Vr360Step {
    fn strategy(&self) -> ImmersiveStrategy {
        ImmersiveStrategy::Vr360
    }

    fn applies(&self, ctx: &NegotiationContext) -> bool {
        ctx.platform.platform.is_mobile() && !ctx.platform.is_oculus_browser
    }

    async fn attempt(&self, ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError> {
        match self.gateway.open_window(&self.viewer_url(&ctx.model_url))? {
            PopupOutcome::Opened => Ok(AttemptOutcome::Entered),
            PopupOutcome::Blocked => {
                self.notifier.notify(
                    "Your browser blocked the 360° viewer window. Allow popups for this \
                     site and try again.",
                );
                Err(XrError::PopupBlocked)
            }
        }
    }
}
