//! Injected platform capabilities.
//!
//! The browser globals the original viewer leaned on (navigator, window,
//! anchor elements) become explicit seams here: a [`PlatformInfo`] snapshot
//! plus three capability traits. Hosts wire real DOM-backed implementations;
//! tests wire scripted doubles.

use async_trait::async_trait;

use crate::error::XrError;
use plx_core::Platform;

/// XR session mode, matching the WebXR mode strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XrSessionMode {
    ImmersiveAr,
    ImmersiveVr,
}

impl XrSessionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImmersiveAr => "immersive-ar",
            Self::ImmersiveVr => "immersive-vr",
        }
    }
}

/// Outcome of opening a new browsing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOutcome {
    Opened,
    /// The browser's popup blocker intervened.
    Blocked,
}

/// Platform snapshot for one browsing context, inferred from the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub is_chrome: bool,
    pub is_oculus_browser: bool,
    /// Whether the page is served over HTTPS (Scene Viewer requires it).
    pub secure_context: bool,
}

impl PlatformInfo {
    /// Heuristic user-agent classification.
    ///
    /// Deliberately coarse: it gates which cascade steps apply, and the
    /// steps' own failure handling covers misclassification.
    #[must_use]
    pub fn from_user_agent(user_agent: &str, secure_context: bool) -> Self {
        let ua = user_agent.to_ascii_lowercase();

        let is_oculus_browser = ua.contains("oculusbrowser") || ua.contains("quest");
        let platform = if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            Platform::Ios
        } else if ua.contains("android") {
            Platform::Android
        } else if ua.contains("windows") || ua.contains("macintosh") || ua.contains("linux") {
            Platform::Desktop
        } else {
            Platform::Other
        };
        // Edge and Opera embed "chrome" in their UA; exclude the ones that
        // do not ship the Scene Viewer intent handler.
        let is_chrome = ua.contains("chrome") && !ua.contains("edg/") && !ua.contains("opr/");

        Self {
            platform,
            is_chrome,
            is_oculus_browser,
            secure_context,
        }
    }

    /// Whether the Android Scene Viewer intent path is plausible here.
    #[must_use]
    pub const fn supports_scene_viewer(&self) -> bool {
        matches!(self.platform, Platform::Android)
            && self.is_chrome
            && self.secure_context
            && !self.is_oculus_browser
    }
}

/// The WebXR session API seam.
#[async_trait]
pub trait XrRuntime: Send + Sync {
    /// Whether the XR API exists at all in this browsing context.
    fn available(&self) -> bool;

    /// Query support for one session mode.
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Runtime`] when the query itself fails. Callers
    /// treat that as "unsupported" for this mode only.
    async fn is_session_supported(&self, mode: XrSessionMode) -> Result<bool, XrError>;

    /// Request an immersive session. May suspend on a permission prompt.
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Runtime`] when entry fails or the user denies the
    /// prompt.
    async fn request_session(&self, mode: XrSessionMode) -> Result<(), XrError>;
}

/// Browser-surface actions the cascade drives.
pub trait ImmersiveGateway: Send + Sync {
    /// Native Quick Look capability check (the `rel=ar` anchor-relation
    /// probe).
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Gateway`] when the capability check itself fails.
    fn supports_quick_look(&self) -> Result<bool, XrError>;

    /// Open a USDZ URL through the system AR viewer (`rel=ar` anchor).
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Gateway`] when the anchor cannot be dispatched.
    fn open_quick_look(&self, url: &str) -> Result<(), XrError>;

    /// Navigate the current browsing context (Scene Viewer intent URL).
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Gateway`] when navigation is refused.
    fn navigate(&self, url: &str) -> Result<(), XrError>;

    /// Open a URL in a new window (the 360° fallback viewer).
    ///
    /// # Errors
    ///
    /// Returns [`XrError::Gateway`] on failure; a blocked popup is the
    /// [`PopupOutcome::Blocked`] success case, not an error.
    fn open_window(&self, url: &str) -> Result<PopupOutcome, XrError>;

    /// URL of the page currently hosting the viewer (intent fallback
    /// target).
    fn current_page_url(&self) -> String;
}

/// User-facing messages and confirmations from the cascade.
#[async_trait]
pub trait UserNotifier: Send + Sync {
    /// Show an informational message.
    fn notify(&self, message: &str);

    /// Ask the user to proceed or cancel. May suspend until they answer.
    async fn confirm(&self, message: &str) -> bool;
}
