//! # plx-core
//!
//! Core types shared across all Parallax crates:
//! - Catalog entities (`ModelAsset`) and the closed asset-kind union
//! - Platform / XR capability types (`Platform`, `XrSupport`)
//! - Immersive negotiation vocabulary (`ImmersiveStrategy`, `AttemptOutcome`,
//!   `ImmersiveAttempt`)
//! - The fire-and-forget observability seam (`ViewerEvent`, `EventSink`)

pub mod entities;
pub mod enums;
pub mod events;

pub use entities::{ImmersiveAttempt, ModelAsset, XrSupport};
pub use enums::{AssetKind, AttemptOutcome, DeliveryKind, ImmersiveStrategy, Platform};
pub use events::{EventSink, NullSink, TracingSink, ViewerEvent};
