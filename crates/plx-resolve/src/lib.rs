//! # plx-resolve
//!
//! Asset reference resolution and authorization for Parallax.
//!
//! Turns a stored asset reference into a fetchable, authorized URL in two
//! stages:
//! 1. [`resolver`]: pure normalization of the raw reference (blob/data
//!    passthrough, bucket-host rewriting, proxy routing, origin resolution)
//! 2. [`gate`]: the signed-URL exchange for protected assets, with a
//!    best-effort fallback ladder and a terminal-error taxonomy
//!
//! Also hosts the USDZ-availability client of the conversion pipeline
//! ([`usdz`]) and the per-viewer [`session`] wrapper that makes a new
//! authorization supersede, rather than race, an in-flight one.

pub mod gate;
pub mod resolver;
pub mod session;
pub mod usdz;

mod error;
mod http;

pub use error::ResolveError;
pub use gate::{AuthorizedUrl, HttpSigningClient, SignedUrlGate, SignedUrlTicket, SigningApi};
pub use resolver::{RefKind, ResolvedAsset, ResolverContext, protected_key, resolve};
pub use session::{GateSession, RetryBudget};
pub use usdz::{HttpUsdzClient, UsdzAvailability, UsdzAvailabilityApi};
