//! Platform AR viewers: iOS Quick Look and Android Scene Viewer.

use std::sync::Arc;

use async_trait::async_trait;

use plx_core::{AttemptOutcome, ImmersiveStrategy, Platform};
use plx_resolve::{ResolverContext, SignedUrlGate, UsdzAvailabilityApi, protected_key, resolve};

use crate::capabilities::{ImmersiveGateway, UserNotifier};
use crate::cascade::{CascadeStep, NegotiationContext};
use crate::error::XrError;

// ---------------------------------------------------------------------------
// Quick Look
// ---------------------------------------------------------------------------

/// iOS Quick Look via the `rel=ar` anchor convention.
///
/// Resolution order for the USDZ to open:
/// 1. the explicit companion URL the caller supplied,
/// 2. the conversion pipeline's availability answer for the protected key
///    (with a proceed-or-cancel prompt when a manual upload is required),
/// 3. a naive `.glb`/`.gltf` to `.usdz` extension swap, a best-effort guess
///    that is not guaranteed to exist.
pub struct QuickLookStep {
    availability: Arc<dyn UsdzAvailabilityApi>,
    gateway: Arc<dyn ImmersiveGateway>,
    notifier: Arc<dyn UserNotifier>,
    protected_segment: String,
}

impl QuickLookStep {
    #[must_use]
    pub fn new(
        availability: Arc<dyn UsdzAvailabilityApi>,
        gateway: Arc<dyn ImmersiveGateway>,
        notifier: Arc<dyn UserNotifier>,
        protected_segment: impl Into<String>,
    ) -> Self {
        Self {
            availability,
            gateway,
            notifier,
            protected_segment: protected_segment.into(),
        }
    }

    async fn usdz_from_pipeline(&self, ctx: &NegotiationContext) -> Result<Option<String>, XrError> {
        let Some(key) = protected_key(&ctx.model_url, &self.protected_segment) else {
            return Ok(None);
        };

        match self.availability.check(&key, ctx.credential.as_deref()).await {
            Ok(availability) => {
                if let Some(url) = availability.usdz_url {
                    return Ok(Some(url));
                }
                if availability.requires_manual_upload {
                    let expected = availability
                        .expected_file_name()
                        .unwrap_or_else(|| "<base name>.usdz".to_string());
                    let size_mb = availability.file_size_mb.unwrap_or(0.0);
                    let message = format!(
                        "This model has no iOS (USDZ) version yet. At {size_mb:.1} MB it is \
                         above the automatic conversion limit, so one must be uploaded as \
                         '{expected}'. Continue with a best-effort preview anyway?",
                    );
                    if !self.notifier.confirm(&message).await {
                        return Err(XrError::Cancelled);
                    }
                }
                Ok(None)
            }
            Err(error) => {
                // Availability is advisory; fall through to the naive guess.
                tracing::warn!(%key, %error, "USDZ availability query failed");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl CascadeStep for QuickLookStep {
    fn strategy(&self) -> ImmersiveStrategy {
        ImmersiveStrategy::QuickLook
    }

    fn applies(&self, ctx: &NegotiationContext) -> bool {
        ctx.platform.platform == Platform::Ios
    }

    async fn attempt(&self, ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError> {
        if let Some(usdz) = &ctx.usdz_url {
            self.gateway.open_quick_look(usdz)?;
            return Ok(AttemptOutcome::Entered);
        }

        if let Some(usdz) = self.usdz_from_pipeline(ctx).await? {
            self.gateway.open_quick_look(&usdz)?;
            return Ok(AttemptOutcome::Entered);
        }

        match usdz_guess(&ctx.model_url) {
            Some(guess) => {
                self.gateway.open_quick_look(&guess)?;
                Ok(AttemptOutcome::Fallback)
            }
            None => Ok(AttemptOutcome::Unsupported),
        }
    }
}

/// Naively swap a `.glb`/`.gltf` extension for `.usdz`, preserving any query
/// string.
fn usdz_guess(model_url: &str) -> Option<String> {
    let lower = model_url.to_ascii_lowercase();
    let (needle_at, needle_len) = match (lower.rfind(".glb"), lower.rfind(".gltf")) {
        (Some(glb), Some(gltf)) => {
            if glb >= gltf {
                (glb, ".glb".len())
            } else {
                (gltf, ".gltf".len())
            }
        }
        (Some(glb), None) => (glb, ".glb".len()),
        (None, Some(gltf)) => (gltf, ".gltf".len()),
        (None, None) => return None,
    };
    let mut guessed = String::with_capacity(model_url.len() + 1);
    guessed.push_str(&model_url[..needle_at]);
    guessed.push_str(".usdz");
    guessed.push_str(&model_url[needle_at + needle_len..]);
    Some(guessed)
}

// ---------------------------------------------------------------------------
// Scene Viewer
// ---------------------------------------------------------------------------

/// Android Scene Viewer intent navigation.
///
/// The intent embeds a fully absolute, authorized model URL (the gate is
/// re-run here because Scene Viewer fetches outside the page's auth
/// context), plus a browser fallback URL pointing back at the current page.
pub struct SceneViewerStep {
    gate: SignedUrlGate,
    resolver_ctx: ResolverContext,
    gateway: Arc<dyn ImmersiveGateway>,
}

impl SceneViewerStep {
    #[must_use]
    pub fn new(
        gate: SignedUrlGate,
        resolver_ctx: ResolverContext,
        gateway: Arc<dyn ImmersiveGateway>,
    ) -> Self {
        Self {
            gate,
            resolver_ctx,
            gateway,
        }
    }
}

#[async_trait]
impl CascadeStep for SceneViewerStep {
    fn strategy(&self) -> ImmersiveStrategy {
        ImmersiveStrategy::SceneViewer
    }

    fn applies(&self, ctx: &NegotiationContext) -> bool {
        ctx.platform.supports_scene_viewer()
    }

    async fn attempt(&self, ctx: &NegotiationContext) -> Result<AttemptOutcome, XrError> {
        let resolved = resolve(&ctx.model_url, &self.resolver_ctx)?;
        let authorized = self
            .gate
            .authorize(&resolved, ctx.credential.as_deref())
            .await?;
        let absolute = absolutize(&authorized.url, &self.resolver_ctx.origin);

        let intent = scene_viewer_intent_url(&absolute, &self.gateway.current_page_url());
        self.gateway.navigate(&intent)?;
        Ok(AttemptOutcome::Entered)
    }
}

/// Prefix root-relative URLs with the application origin; Scene Viewer only
/// accepts absolute URLs.
fn absolutize(url: &str, origin: &str) -> String {
    if url.starts_with('/') {
        format!("{}{url}", origin.trim_end_matches('/'))
    } else {
        url.to_string()
    }
}

/// Build the Scene Viewer intent URL with a browser fallback.
fn scene_viewer_intent_url(model_url: &str, fallback_url: &str) -> String {
    format!(
        "intent://arvr.google.com/scene-viewer/1.0?file={file}&mode=ar_preferred\
         #Intent;scheme=https;package=com.google.android.googlequicksearchbox;\
         action=android.intent.action.VIEW;S.browser_fallback_url={fallback};end;",
        file = urlencoding::encode(model_url),
        fallback = urlencoding::encode(fallback_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn guess_swaps_glb_extension() {
        assert_eq!(
            usdz_guess("https://cdn.example/models/chair.glb").as_deref(),
            Some("https://cdn.example/models/chair.usdz")
        );
    }

    #[test]
    fn guess_swaps_gltf_and_keeps_query() {
        assert_eq!(
            usdz_guess("https://cdn.example/scene.gltf?sig=abc").as_deref(),
            Some("https://cdn.example/scene.usdz?sig=abc")
        );
    }

    #[test]
    fn guess_handles_uppercase() {
        assert_eq!(
            usdz_guess("/model/u1/CHAIR.GLB").as_deref(),
            Some("/model/u1/CHAIR.usdz")
        );
    }

    #[test]
    fn no_guess_without_model_extension() {
        assert_eq!(usdz_guess("https://cdn.example/models/chair"), None);
    }

    #[test]
    fn intent_url_embeds_model_and_fallback() {
        let intent = scene_viewer_intent_url(
            "https://cdn.example/chair.glb",
            "https://app.example/section/7",
        );
        assert!(intent.starts_with("intent://arvr.google.com/scene-viewer/1.0?file="));
        assert!(intent.contains("https%3A%2F%2Fcdn.example%2Fchair.glb"));
        assert!(intent.contains("mode=ar_preferred"));
        assert!(
            intent.contains("S.browser_fallback_url=https%3A%2F%2Fapp.example%2Fsection%2F7")
        );
        assert!(intent.ends_with(";end;"));
    }

    #[test]
    fn absolutize_only_touches_relative_urls() {
        assert_eq!(
            absolutize("/model/u1/chair.glb", "https://app.example"),
            "https://app.example/model/u1/chair.glb"
        );
        assert_eq!(
            absolutize("https://cdn.example/chair.glb", "https://app.example"),
            "https://cdn.example/chair.glb"
        );
    }
}
