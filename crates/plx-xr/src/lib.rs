//! # plx-xr
//!
//! XR capability detection and immersive-session negotiation for Parallax.
//!
//! [`probe`] answers "which immersive buttons should render?", advisory
//! only. [`negotiator`] answers a button press by walking an ordered
//! fallback cascade (native XR session → iOS Quick Look → Android Scene
//! Viewer intent → 360° viewer) expressed as data in [`cascade`], never as
//! nested control flow. Platform primitives (the XR session API, the
//! `rel=ar` anchor, intent navigation, popup windows) are consumed through
//! the injected seams in [`capabilities`], so everything here is testable
//! without a browser.

pub mod capabilities;
pub mod cascade;
pub mod negotiator;
pub mod probe;
pub mod strategies;

mod error;

pub use capabilities::{
    ImmersiveGateway, PlatformInfo, PopupOutcome, UserNotifier, XrRuntime, XrSessionMode,
};
pub use cascade::{CascadeStep, NegotiationContext, NegotiationReport};
pub use error::XrError;
pub use negotiator::{ImmersiveMode, ImmersiveSessionNegotiator, NegotiatorServices};
pub use probe::XrCapabilityProbe;
