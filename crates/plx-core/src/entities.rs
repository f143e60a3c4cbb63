//! Catalog and capability entities.
//!
//! `ModelAsset` rows are owned by the upstream catalog service; Parallax
//! only reads them. `XrSupport` and `ImmersiveAttempt` are transient,
//! recomputed per probe / per negotiation run, and never persisted.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AssetKind, AttemptOutcome, DeliveryKind, ImmersiveStrategy, Platform};

/// One uploaded asset as the catalog reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelAsset {
    /// Storage key (unique within the owner's bucket namespace).
    pub name: String,
    /// Original file name as uploaded. The name minus its `.glb`/`.usdz`
    /// extension is the companion pairing key.
    pub file_name: String,
    pub file_type: AssetKind,
    pub size_bytes: u64,
    pub owner_id: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ModelAsset {
    /// The delivery format, if this asset is a pairable 3D model file.
    #[must_use]
    pub fn delivery_kind(&self) -> Option<DeliveryKind> {
        if self.file_type != AssetKind::Model {
            return None;
        }
        DeliveryKind::from_file_name(&self.file_name)
    }

    /// File name with the pairing extension stripped (case-insensitive).
    ///
    /// Non-model files return the full file name unchanged.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self.delivery_kind() {
            Some(_) => self
                .file_name
                .rsplit_once('.')
                .map_or(self.file_name.as_str(), |(stem, _)| stem),
            None => self.file_name.as_str(),
        }
    }
}

/// XR capability snapshot for one browsing context.
///
/// Advisory only: it gates which immersive buttons are rendered. The
/// negotiator re-verifies support at invocation time, since permissions can
/// change between probe and click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct XrSupport {
    pub ar_supported: bool,
    pub vr_supported: bool,
    pub platform: Platform,
}

impl XrSupport {
    /// A snapshot reporting no immersive support at all.
    #[must_use]
    pub const fn none(platform: Platform) -> Self {
        Self {
            ar_supported: false,
            vr_supported: false,
            platform,
        }
    }

    /// A snapshot reporting both modes supported.
    ///
    /// Used when detection itself fails: the buttons stay visible and the
    /// cascade's own failure handling does the real gatekeeping.
    #[must_use]
    pub const fn optimistic(platform: Platform) -> Self {
        Self {
            ar_supported: true,
            vr_supported: true,
            platform,
        }
    }
}

/// Ephemeral record of one cascade step's attempt and outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImmersiveAttempt {
    pub strategy: ImmersiveStrategy,
    pub outcome: AttemptOutcome,
}

impl ImmersiveAttempt {
    #[must_use]
    pub const fn new(strategy: ImmersiveStrategy, outcome: AttemptOutcome) -> Self {
        Self { strategy, outcome }
    }
}
