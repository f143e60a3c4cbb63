//! Shared HTTP response mapping for the consumed protected-asset services.
//!
//! Centralizes the status taxonomy (401/403 and 404 are terminal for the
//! viewer, everything else non-success degrades) so the signing and
//! availability clients stay focused on request construction and payload
//! mapping.

use crate::error::ResolveError;

/// Check a protected-service response for the shared error taxonomy.
///
/// Returns the response unchanged on success. Handles:
/// - **401 / 403** → [`ResolveError::AccessDenied`] (terminal, no retry)
/// - **404** → [`ResolveError::NotFound`] (terminal)
/// - **any other non-success status** → [`ResolveError::Signing`] with the
///   status and response body (non-terminal; callers degrade)
pub async fn check_protected_response(
    resp: reqwest::Response,
    key: &str,
) -> Result<reqwest::Response, ResolveError> {
    let status = resp.status();
    match status.as_u16() {
        401 | 403 => Err(ResolveError::AccessDenied {
            key: key.to_string(),
            status: status.as_u16(),
        }),
        404 => Err(ResolveError::NotFound {
            key: key.to_string(),
        }),
        _ if !status.is_success() => Err(ResolveError::Signing(format!(
            "HTTP {}: {}",
            status.as_u16(),
            resp.text().await.unwrap_or_default(),
        ))),
        _ => Ok(resp),
    }
}
