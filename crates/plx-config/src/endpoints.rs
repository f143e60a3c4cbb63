//! Consumed-service endpoints: signed-URL issuer, USDZ availability, and the
//! 360° viewer page.

use serde::{Deserialize, Serialize};

/// Default path of the orientation-driven 360° viewer page.
fn default_viewer_360_path() -> String {
    String::from("/viewer/360")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    /// Signed-URL issuer endpoint. The protected key is appended as a path
    /// segment.
    #[serde(default)]
    pub signing_url: String,

    /// USDZ-availability endpoint of the conversion pipeline. The GLB key is
    /// appended as a path segment.
    #[serde(default)]
    pub usdz_availability_url: String,

    /// Path (on the application origin) of the 360° fallback viewer page.
    #[serde(default = "default_viewer_360_path")]
    pub viewer_360_path: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            signing_url: String::new(),
            usdz_availability_url: String::new(),
            viewer_360_path: default_viewer_360_path(),
        }
    }
}

impl EndpointsConfig {
    /// Check if the endpoints required for protected-asset viewing are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.signing_url.is_empty()
    }
}
