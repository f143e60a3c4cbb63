//! # plx-pairing
//!
//! Companion pairing and asset health for Parallax.
//!
//! A logical 3D model ships as up to two delivery artifacts with one base
//! name: a GLB (Android, in-page viewer) and a USDZ (iOS Quick Look). This
//! crate groups catalog assets into those companion groups ([`group`]) and
//! aggregates cross-platform completeness for operators ([`health`]). Both
//! halves are pure: no I/O, no clock, no catalog writes.

pub mod group;
pub mod health;

pub use group::{Collision, CompanionGroup, GroupedAssets, MissingCompanion, group_assets};
pub use health::{HealthSummary, summarize};
