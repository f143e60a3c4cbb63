//! Pure asset-reference normalization.
//!
//! `resolve` classifies a raw stored reference and rewrites it into the URL
//! the viewer actually fetches. It never performs I/O: same input and context
//! always produce the same output, and every failure is a returned
//! [`ResolveError`], so callers render a stable error state instead of
//! crashing the viewer.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResolveError;
use plx_config::ParallaxConfig;

/// Classification of a resolved asset reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// Root-relative path served as same-origin static content.
    Local,
    /// `blob:` object URL minted by the browsing context.
    Blob,
    /// Inline `data:` URI.
    Data,
    /// Storage-provider host rewritten to the public base URL.
    Bucket,
    /// Cross-origin host routed through the same-origin asset proxy.
    Proxy,
    /// Any other reference, resolved against the application origin.
    Absolute,
}

/// A normalized fetch target. Created per render/request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAsset {
    pub canonical_url: String,
    pub requires_auth: bool,
    pub kind: RefKind,
}

/// Context for one resolution pass, derived from configuration.
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Application origin (scheme + host), e.g. `https://app.example`.
    pub origin: String,
    /// Hosts routed through the same-origin proxy.
    pub proxy_host_allowlist: Vec<String>,
    /// Proxy endpoint path on the origin.
    pub proxy_path: String,
    /// Storage-provider hosts subject to public-base rewriting.
    pub bucket_hosts: Vec<String>,
    /// Public base URL bucket hosts are rewritten to; empty disables the
    /// rewrite.
    pub public_bucket_base_url: String,
    /// Reserved path segment marking protected assets.
    pub protected_segment: String,
}

impl ResolverContext {
    /// Build a context from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ParallaxConfig) -> Self {
        Self {
            origin: config.general.origin.clone(),
            proxy_host_allowlist: config.proxy.host_allowlist.clone(),
            proxy_path: config.proxy.path.clone(),
            bucket_hosts: config.storage.bucket_hosts.clone(),
            public_bucket_base_url: config.storage.public_base_url.clone(),
            protected_segment: config.storage.protected_segment.clone(),
        }
    }

    fn is_bucket_host(&self, host: &str) -> bool {
        self.bucket_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    fn is_proxy_host(&self, host: &str) -> bool {
        self.proxy_host_allowlist
            .iter()
            .any(|h| h.eq_ignore_ascii_case(host))
    }
}

/// Normalize a raw asset reference into a fetch target.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidReference`] for empty sources, references
/// that cannot be resolved against the origin, and a misconfigured public
/// base URL.
pub fn resolve(raw_source: &str, ctx: &ResolverContext) -> Result<ResolvedAsset, ResolveError> {
    let raw = raw_source.trim();
    if raw.is_empty() {
        return Err(ResolveError::InvalidReference(
            "empty asset source".to_string(),
        ));
    }

    // Browser-minted references carry their own payload and never need auth.
    if raw.starts_with("blob:") {
        return Ok(ResolvedAsset {
            canonical_url: raw.to_string(),
            requires_auth: false,
            kind: RefKind::Blob,
        });
    }
    if raw.starts_with("data:") {
        return Ok(ResolvedAsset {
            canonical_url: raw.to_string(),
            requires_auth: false,
            kind: RefKind::Data,
        });
    }

    // Root-relative paths (hero assets, bundled demos, protected keys) are
    // same-origin static content, returned unchanged.
    if raw.starts_with('/') {
        return Ok(ResolvedAsset {
            canonical_url: raw.to_string(),
            requires_auth: protected_key(raw, &ctx.protected_segment).is_some(),
            kind: RefKind::Local,
        });
    }

    match Url::parse(raw) {
        Ok(parsed) => resolve_absolute(raw, &parsed, ctx),
        // Relative reference without a leading slash: resolve against the
        // origin.
        Err(_) => {
            let origin = Url::parse(&ctx.origin).map_err(|e| {
                ResolveError::InvalidReference(format!("origin '{}': {e}", ctx.origin))
            })?;
            let joined = origin.join(raw).map_err(|e| {
                ResolveError::InvalidReference(format!("cannot resolve '{raw}': {e}"))
            })?;
            Ok(ResolvedAsset {
                requires_auth: protected_key(joined.path(), &ctx.protected_segment).is_some(),
                canonical_url: joined.to_string(),
                kind: RefKind::Absolute,
            })
        }
    }
}

fn resolve_absolute(
    raw: &str,
    parsed: &Url,
    ctx: &ResolverContext,
) -> Result<ResolvedAsset, ResolveError> {
    let host = parsed.host_str().unwrap_or_default();

    if ctx.is_bucket_host(host) {
        if ctx.public_bucket_base_url.is_empty() {
            // No public base configured: pass the provider URL through.
            return Ok(ResolvedAsset {
                canonical_url: raw.to_string(),
                requires_auth: protected_key(parsed.path(), &ctx.protected_segment).is_some(),
                kind: RefKind::Bucket,
            });
        }
        let rewritten = swap_host_and_scheme(parsed, &ctx.public_bucket_base_url)?;
        return Ok(ResolvedAsset {
            canonical_url: rewritten,
            requires_auth: protected_key(parsed.path(), &ctx.protected_segment).is_some(),
            kind: RefKind::Bucket,
        });
    }

    if ctx.is_proxy_host(host) {
        let canonical_url = format!(
            "{}{}?url={}",
            ctx.origin.trim_end_matches('/'),
            ctx.proxy_path,
            urlencoding::encode(raw),
        );
        return Ok(ResolvedAsset {
            canonical_url,
            requires_auth: false,
            kind: RefKind::Proxy,
        });
    }

    Ok(ResolvedAsset {
        canonical_url: raw.to_string(),
        requires_auth: protected_key(parsed.path(), &ctx.protected_segment).is_some(),
        kind: RefKind::Absolute,
    })
}

/// Rebuild `url` on the public base's scheme/host/port, preserving path and
/// query exactly.
fn swap_host_and_scheme(url: &Url, public_base: &str) -> Result<String, ResolveError> {
    let mut out = Url::parse(public_base).map_err(|e| {
        ResolveError::InvalidReference(format!("invalid public base URL '{public_base}': {e}"))
    })?;
    out.set_path(url.path());
    out.set_query(url.query());
    Ok(out.to_string())
}

/// Extract the protected storage key from a URL or path, if the path carries
/// the reserved segment (`/{segment}/<key>`).
///
/// The key may itself contain slashes; everything after the segment (query
/// excluded) is the key.
#[must_use]
pub fn protected_key(url_or_path: &str, segment: &str) -> Option<String> {
    let path = match Url::parse(url_or_path) {
        Ok(url) => url.path().to_string(),
        Err(_) => url_or_path
            .split_once('?')
            .map_or(url_or_path, |(path, _)| path)
            .to_string(),
    };

    let mut segments = path.split('/');
    segments.find(|s| *s == segment)?;
    let key = segments.collect::<Vec<_>>().join("/");
    if key.is_empty() { None } else { Some(key) }
}
