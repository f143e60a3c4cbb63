//! The signed-URL exchange for protected assets.
//!
//! `SignedUrlGate` exchanges a protected asset key plus bearer credential for
//! a short-lived signed URL. Signed-URL expiry is opaque and
//! server-controlled; the only local rule is "re-request on 401/403 via an
//! explicit caller retry". The gate's fallback ladder:
//!
//! - no auth required / no protected key → passthrough, zero network calls
//! - no credential → original URL as a best-effort public attempt
//! - 200 with `url` → the signed URL
//! - 200 without `url` → log, original URL (non-fatal)
//! - 401/403 → [`ResolveError::AccessDenied`], terminal
//! - 404 → [`ResolveError::NotFound`], terminal
//! - transport/payload failure → log, original URL, exactly once
//!
//! At most one signing call is made per `authorize` invocation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::http::check_protected_response;
use crate::resolver::{ResolvedAsset, protected_key};
use plx_config::ParallaxConfig;

/// A signed fetch ticket from the issuer. Expiry is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrlTicket {
    pub key: String,
    pub url: String,
}

/// An authorized fetch target, ready for the rendering capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUrl {
    pub url: String,
    /// Whether `url` came from the signing exchange (as opposed to a
    /// passthrough or best-effort unsigned fallback).
    pub signed: bool,
}

impl AuthorizedUrl {
    fn passthrough(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            signed: false,
        }
    }
}

/// The signed-URL issuer seam.
///
/// `Ok(None)` models a 200 response without a `url` field, a non-fatal
/// issuer quirk the gate degrades around.
#[async_trait]
pub trait SigningApi: Send + Sync {
    /// Exchange `key` + bearer `credential` for a signed URL.
    ///
    /// # Errors
    ///
    /// [`ResolveError::AccessDenied`] / [`ResolveError::NotFound`] are
    /// terminal; any other error is treated as transient by the gate.
    async fn sign(
        &self,
        key: &str,
        credential: &str,
    ) -> Result<Option<SignedUrlTicket>, ResolveError>;
}

/// Gate from resolved references to authorized URLs.
#[derive(Clone)]
pub struct SignedUrlGate {
    api: Arc<dyn SigningApi>,
    protected_segment: String,
}

impl SignedUrlGate {
    #[must_use]
    pub fn new(api: Arc<dyn SigningApi>, protected_segment: impl Into<String>) -> Self {
        Self {
            api,
            protected_segment: protected_segment.into(),
        }
    }

    /// Authorize a resolved asset for fetching.
    ///
    /// Makes at most one signing call; on any non-terminal failure the
    /// original URL is returned rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::AccessDenied`] on 401/403 and
    /// [`ResolveError::NotFound`] on 404. Everything else degrades to the
    /// unsigned URL.
    pub async fn authorize(
        &self,
        resolved: &ResolvedAsset,
        credential: Option<&str>,
    ) -> Result<AuthorizedUrl, ResolveError> {
        if !resolved.requires_auth {
            return Ok(AuthorizedUrl::passthrough(resolved.canonical_url.clone()));
        }

        let Some(key) = protected_key(&resolved.canonical_url, &self.protected_segment) else {
            return Ok(AuthorizedUrl::passthrough(resolved.canonical_url.clone()));
        };

        let Some(credential) = credential else {
            tracing::debug!(%key, "no credential; attempting unsigned fetch");
            return Ok(AuthorizedUrl::passthrough(resolved.canonical_url.clone()));
        };

        match self.api.sign(&key, credential).await {
            Ok(Some(ticket)) => Ok(AuthorizedUrl {
                url: ticket.url,
                signed: true,
            }),
            Ok(None) => {
                tracing::warn!(%key, "signing endpoint returned no url; using original");
                Ok(AuthorizedUrl::passthrough(resolved.canonical_url.clone()))
            }
            Err(err) if err.is_terminal() => Err(err),
            Err(err) => {
                tracing::warn!(%key, %err, "signing failed; falling back to unsigned URL");
                Ok(AuthorizedUrl::passthrough(resolved.canonical_url.clone()))
            }
        }
    }
}

/// Raw payload of the signing endpoint.
#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    url: Option<String>,
}

/// HTTP implementation of [`SigningApi`] against the configured issuer.
pub struct HttpSigningClient {
    http: reqwest::Client,
    signing_url: String,
}

impl HttpSigningClient {
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
            signing_url: config.endpoints.signing_url.clone(),
        }
    }
}

#[async_trait]
impl SigningApi for HttpSigningClient {
    async fn sign(
        &self,
        key: &str,
        credential: &str,
    ) -> Result<Option<SignedUrlTicket>, ResolveError> {
        let url = format!(
            "{}/{}",
            self.signing_url.trim_end_matches('/'),
            urlencoding::encode(key),
        );
        let resp = self.http.get(&url).bearer_auth(credential).send().await?;
        let resp = check_protected_response(resp, key).await?;

        let body: SignedUrlResponse = resp
            .json()
            .await
            .map_err(|e| ResolveError::Signing(format!("payload parse failed: {e}")))?;
        Ok(body.url.map(|url| SignedUrlTicket {
            key: key.to_string(),
            url,
        }))
    }
}
