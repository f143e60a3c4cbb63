//! USDZ-availability client for the conversion pipeline.
//!
//! Given a GLB storage key, the pipeline reports whether a converted USDZ
//! companion already exists, or whether the model exceeded the automatic
//! conversion threshold and needs a manual upload.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::http::check_protected_response;
use plx_config::ParallaxConfig;

/// Availability verdict for a GLB key's USDZ companion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdzAvailability {
    pub success: bool,
    /// Fetchable USDZ URL, when the companion exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usdz_url: Option<String>,
    /// The model is too large for automatic conversion; the owner must
    /// upload a companion by hand.
    #[serde(default)]
    pub requires_manual_upload: bool,
    /// Pairing base name the manual upload must use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_mb: Option<f64>,
}

impl UsdzAvailability {
    /// The expected manual-upload file name, when one is required.
    #[must_use]
    pub fn expected_file_name(&self) -> Option<String> {
        if !self.requires_manual_upload {
            return None;
        }
        self.base_name.as_ref().map(|base| format!("{base}.usdz"))
    }
}

/// The conversion-pipeline availability seam.
#[async_trait]
pub trait UsdzAvailabilityApi: Send + Sync {
    /// Query USDZ availability for a GLB storage key.
    ///
    /// # Errors
    ///
    /// Shares the protected-service taxonomy: 401/403 →
    /// [`ResolveError::AccessDenied`], 404 → [`ResolveError::NotFound`],
    /// anything else → transient.
    async fn check(
        &self,
        key: &str,
        credential: Option<&str>,
    ) -> Result<UsdzAvailability, ResolveError>;
}

/// HTTP implementation of [`UsdzAvailabilityApi`].
pub struct HttpUsdzClient {
    http: reqwest::Client,
    availability_url: String,
}

impl HttpUsdzClient {
    /// Build a client from loaded configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn from_config(config: &ParallaxConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("parallax/0.1")
                .timeout(Duration::from_secs(config.general.http_timeout_secs))
                .build()
                .expect("reqwest client should build"),
            availability_url: config.endpoints.usdz_availability_url.clone(),
        }
    }
}

#[async_trait]
impl UsdzAvailabilityApi for HttpUsdzClient {
    async fn check(
        &self,
        key: &str,
        credential: Option<&str>,
    ) -> Result<UsdzAvailability, ResolveError> {
        let url = format!(
            "{}/{}",
            self.availability_url.trim_end_matches('/'),
            urlencoding::encode(key),
        );
        let mut request = self.http.get(&url);
        if let Some(credential) = credential {
            request = request.bearer_auth(credential);
        }
        let resp = request.send().await?;
        let resp = check_protected_response(resp, key).await?;

        resp.json()
            .await
            .map_err(|e| ResolveError::Signing(format!("availability payload parse failed: {e}")))
    }
}
