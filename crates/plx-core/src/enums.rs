//! Closed unions for asset kinds, platforms, and immersive negotiation.
//!
//! All enums use explicit serde representations matching the wire strings the
//! dashboard and the observability sink expect. Matching is exhaustive; a
//! new variant is a deliberate API change, not a stringly-typed drift.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AssetKind
// ---------------------------------------------------------------------------

/// Kind of an uploaded catalog asset.
///
/// The catalog stores this alongside each upload; rows from older catalogs
/// may lack it, in which case [`AssetKind::from_file_name`] reclassifies from
/// the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// 3D model (GLB/GLTF/USDZ).
    Model,
    Image,
    Video,
    Pdf,
    Audio,
    Archive,
    Other,
}

impl AssetKind {
    /// Return the string representation used by the catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }

    /// Classify a file by its extension (case-insensitive).
    ///
    /// Unknown or missing extensions map to [`AssetKind::Other`].
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "glb" | "gltf" | "usdz" => Self::Model,
            "png" | "jpg" | "jpeg" | "webp" | "gif" | "svg" | "avif" => Self::Image,
            "mp4" | "webm" | "mov" => Self::Video,
            "pdf" => Self::Pdf,
            "mp3" | "wav" | "ogg" | "m4a" => Self::Audio,
            "zip" => Self::Archive,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeliveryKind
// ---------------------------------------------------------------------------

/// Delivery artifact format for one logical 3D model.
///
/// GLB serves Android and the in-page viewer; USDZ serves iOS Quick Look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    Glb,
    Usdz,
}

impl DeliveryKind {
    /// The file extension for this delivery format (lowercase, no dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Usdz => "usdz",
        }
    }

    /// The companion format of this one.
    #[must_use]
    pub const fn companion(self) -> Self {
        match self {
            Self::Glb => Self::Usdz,
            Self::Usdz => Self::Glb,
        }
    }

    /// Classify a model file name, if it is one of the paired formats.
    ///
    /// GLTF counts as GLB for pairing purposes: both are served to the same
    /// platforms.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "glb" | "gltf" => Some(Self::Glb),
            "usdz" => Some(Self::Usdz),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Client platform, inferred heuristically from the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
    Desktop,
    Other,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Desktop => "desktop",
            Self::Other => "other",
        }
    }

    /// Whether this is a handheld platform with an orientation sensor
    /// (eligible for the 360° viewer fallback).
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImmersiveStrategy
// ---------------------------------------------------------------------------

/// One strategy in the immersive-entry cascade.
///
/// Serialized with the exact strings the observability pipeline indexes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ImmersiveStrategy {
    /// Native WebXR session (AR or VR).
    #[serde(rename = "webxr")]
    WebXr,
    /// iOS Quick Look via the `rel=ar` anchor convention.
    #[serde(rename = "quicklook")]
    QuickLook,
    /// Android Scene Viewer intent navigation.
    #[serde(rename = "scene-viewer")]
    SceneViewer,
    /// Orientation-driven 360° viewer page.
    #[serde(rename = "vr360")]
    Vr360,
    /// No strategy applied (cascade exhausted before any attempt).
    #[serde(rename = "none")]
    None,
}

impl ImmersiveStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebXr => "webxr",
            Self::QuickLook => "quicklook",
            Self::SceneViewer => "scene-viewer",
            Self::Vr360 => "vr360",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ImmersiveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AttemptOutcome
// ---------------------------------------------------------------------------

/// Outcome of one cascade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The immersive experience was entered; the cascade stops here.
    Entered,
    /// The step handed off to a degraded-but-viable path (e.g. the naive
    /// extension-swap Quick Look guess).
    Fallback,
    /// The step did not apply on this platform/configuration.
    Unsupported,
    /// The step applied but failed; the cascade continues.
    Error,
}

impl AttemptOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entered => "entered",
            Self::Fallback => "fallback",
            Self::Unsupported => "unsupported",
            Self::Error => "error",
        }
    }

    /// Whether this outcome terminates the cascade.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Entered | Self::Fallback)
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn asset_kind_from_extension() {
        assert_eq!(AssetKind::from_file_name("chair.glb"), AssetKind::Model);
        assert_eq!(AssetKind::from_file_name("chair.USDZ"), AssetKind::Model);
        assert_eq!(AssetKind::from_file_name("hero.webp"), AssetKind::Image);
        assert_eq!(AssetKind::from_file_name("tour.mp4"), AssetKind::Video);
        assert_eq!(AssetKind::from_file_name("manual.pdf"), AssetKind::Pdf);
        assert_eq!(AssetKind::from_file_name("noext"), AssetKind::Other);
        assert_eq!(AssetKind::from_file_name("archive.zip"), AssetKind::Archive);
    }

    #[test]
    fn delivery_kind_pairs_glb_and_gltf_together() {
        assert_eq!(
            DeliveryKind::from_file_name("scene.gltf"),
            Some(DeliveryKind::Glb)
        );
        assert_eq!(
            DeliveryKind::from_file_name("scene.glb"),
            Some(DeliveryKind::Glb)
        );
        assert_eq!(
            DeliveryKind::from_file_name("scene.usdz"),
            Some(DeliveryKind::Usdz)
        );
        assert_eq!(DeliveryKind::from_file_name("scene.png"), None);
        assert_eq!(DeliveryKind::from_file_name("noext"), None);
    }

    #[test]
    fn delivery_kind_companion_is_involutive() {
        assert_eq!(DeliveryKind::Glb.companion(), DeliveryKind::Usdz);
        assert_eq!(DeliveryKind::Usdz.companion().companion(), DeliveryKind::Usdz);
    }

    #[test]
    fn strategy_wire_strings() {
        let json = serde_json::to_string(&ImmersiveStrategy::SceneViewer).unwrap();
        assert_eq!(json, "\"scene-viewer\"");
        let json = serde_json::to_string(&ImmersiveStrategy::WebXr).unwrap();
        assert_eq!(json, "\"webxr\"");
        let back: ImmersiveStrategy = serde_json::from_str("\"vr360\"").unwrap();
        assert_eq!(back, ImmersiveStrategy::Vr360);
    }

    #[test]
    fn outcome_terminality() {
        assert!(AttemptOutcome::Entered.is_terminal());
        assert!(AttemptOutcome::Fallback.is_terminal());
        assert!(!AttemptOutcome::Unsupported.is_terminal());
        assert!(!AttemptOutcome::Error.is_terminal());
    }
}
