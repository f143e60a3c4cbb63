//! Companion grouping by stripped base name.
//!
//! Groups are accumulated into a map keyed by base name, one slot per
//! delivery kind. A duplicate (base name, kind) replaces the earlier asset
//! (catalog listings arrive in upload order, so last wins is most recent),
//! and the displaced asset is reported as a [`Collision`] for operator
//! review rather than silently dropped.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use plx_core::{DeliveryKind, ModelAsset};

/// Both delivery slots for one logical model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompanionGroup {
    pub base_name: String,
    pub glb: Option<ModelAsset>,
    pub usdz: Option<ModelAsset>,
}

impl CompanionGroup {
    fn empty(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            glb: None,
            usdz: None,
        }
    }

    /// A unified group exposes both delivery artifacts of one logical model.
    #[must_use]
    pub const fn is_unified(&self) -> bool {
        self.glb.is_some() && self.usdz.is_some()
    }

    /// Number of filled delivery slots.
    #[must_use]
    pub fn filled_slots(&self) -> usize {
        usize::from(self.glb.is_some()) + usize::from(self.usdz.is_some())
    }

    /// The companion upload needed to complete this group, with the exact
    /// file name the uploader must use. `None` iff the group is unified.
    #[must_use]
    pub fn missing(&self) -> Option<MissingCompanion> {
        let needed = match (&self.glb, &self.usdz) {
            (Some(_), Some(_)) => return None,
            (Some(_), None) => DeliveryKind::Usdz,
            (None, Some(_)) => DeliveryKind::Glb,
            // Unreachable through `group_assets`: a group only exists once a
            // slot is filled.
            (None, None) => return None,
        };
        Some(MissingCompanion {
            needed,
            expected_file_name: format!("{}.{}", self.base_name, needed.extension()),
        })
    }

    fn slot_mut(&mut self, kind: DeliveryKind) -> &mut Option<ModelAsset> {
        match kind {
            DeliveryKind::Glb => &mut self.glb,
            DeliveryKind::Usdz => &mut self.usdz,
        }
    }
}

/// The companion upload that would complete a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MissingCompanion {
    pub needed: DeliveryKind,
    pub expected_file_name: String,
}

/// A displaced asset: two uploads claimed the same (base name, kind) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Collision {
    pub base_name: String,
    pub kind: DeliveryKind,
    /// File name of the asset that was displaced.
    pub displaced: String,
    /// File name of the asset that now occupies the slot.
    pub kept: String,
}

/// Result of one grouping pass over a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroupedAssets {
    /// Companion groups keyed by base name (deterministic order).
    pub groups: BTreeMap<String, CompanionGroup>,
    /// Non-model assets, passed through untouched.
    pub standalone: Vec<ModelAsset>,
    /// Displaced same-slot duplicates, in encounter order.
    pub collisions: Vec<Collision>,
}

impl GroupedAssets {
    /// Total assets accounted for: filled slots + standalone + displaced.
    ///
    /// Equals the input length: the grouping partitions, it never loses or
    /// duplicates an asset.
    #[must_use]
    pub fn accounted(&self) -> usize {
        self.groups
            .values()
            .map(CompanionGroup::filled_slots)
            .sum::<usize>()
            + self.standalone.len()
            + self.collisions.len()
    }
}

/// Group a catalog listing into companion groups.
///
/// Non-model assets (and model files that are not GLB/GLTF/USDZ) pass
/// through as standalone entries. Duplicate (base name, kind) pairs keep the
/// last asset seen and report the displaced one.
#[must_use]
pub fn group_assets(assets: &[ModelAsset]) -> GroupedAssets {
    let mut groups: BTreeMap<String, CompanionGroup> = BTreeMap::new();
    let mut standalone = Vec::new();
    let mut collisions = Vec::new();

    for asset in assets {
        let Some(kind) = asset.delivery_kind() else {
            standalone.push(asset.clone());
            continue;
        };

        let base_name = asset.base_name().to_string();
        let group = groups
            .entry(base_name.clone())
            .or_insert_with(|| CompanionGroup::empty(&base_name));

        if let Some(displaced) = group.slot_mut(kind).replace(asset.clone()) {
            tracing::warn!(
                base_name = %base_name,
                kind = %kind,
                displaced = %displaced.file_name,
                kept = %asset.file_name,
                "companion slot collision; keeping most recent upload",
            );
            collisions.push(Collision {
                base_name,
                kind,
                displaced: displaced.file_name,
                kept: asset.file_name.clone(),
            });
        }
    }

    GroupedAssets {
        groups,
        standalone,
        collisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use plx_core::AssetKind;
    use pretty_assertions::assert_eq;

    fn asset(file_name: &str) -> ModelAsset {
        let file_type = AssetKind::from_file_name(file_name);
        ModelAsset {
            name: format!("models/{file_name}"),
            file_name: file_name.to_string(),
            file_type,
            size_bytes: 2048,
            owner_id: "user_1".to_string(),
            uploaded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn pairs_companions_by_base_name() {
        let grouped = group_assets(&[
            asset("chair.glb"),
            asset("chair.usdz"),
            asset("lamp.glb"),
        ]);

        assert_eq!(grouped.groups.len(), 2);
        assert!(grouped.groups["chair"].is_unified());
        assert!(!grouped.groups["lamp"].is_unified());
        assert!(grouped.standalone.is_empty());
        assert!(grouped.collisions.is_empty());
    }

    #[test]
    fn suggest_missing_companion() {
        let grouped = group_assets(&[asset("lamp.glb"), asset("statue.usdz")]);

        let lamp = grouped.groups["lamp"].missing().unwrap();
        assert_eq!(lamp.needed, DeliveryKind::Usdz);
        assert_eq!(lamp.expected_file_name, "lamp.usdz");

        let statue = grouped.groups["statue"].missing().unwrap();
        assert_eq!(statue.needed, DeliveryKind::Glb);
        assert_eq!(statue.expected_file_name, "statue.glb");
    }

    #[test]
    fn missing_is_none_iff_unified() {
        let grouped = group_assets(&[asset("chair.glb"), asset("chair.usdz")]);
        assert_eq!(grouped.groups["chair"].missing(), None);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let grouped = group_assets(&[asset("chair.GLB"), asset("chair.USDZ")]);
        assert_eq!(grouped.groups.len(), 1);
        assert!(grouped.groups["chair"].is_unified());
    }

    #[test]
    fn non_models_pass_through_standalone() {
        let grouped = group_assets(&[
            asset("chair.glb"),
            asset("poster.png"),
            asset("manual.pdf"),
        ]);

        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(grouped.standalone.len(), 2);
        assert_eq!(grouped.standalone[0].file_name, "poster.png");
    }

    #[test]
    fn duplicate_slot_keeps_last_and_reports_collision() {
        let mut first = asset("chair.glb");
        first.name = "models/a/chair.glb".to_string();
        let mut second = asset("chair.glb");
        second.name = "models/b/chair.glb".to_string();

        let grouped = group_assets(&[first, second.clone()]);

        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(
            grouped.groups["chair"].glb.as_ref().unwrap().name,
            "models/b/chair.glb"
        );
        assert_eq!(grouped.collisions.len(), 1);
        let collision = &grouped.collisions[0];
        assert_eq!(collision.base_name, "chair");
        assert_eq!(collision.kind, DeliveryKind::Glb);
        assert_eq!(collision.displaced, "chair.glb");
    }

    #[test]
    fn grouping_partitions_the_input() {
        let input = vec![
            asset("chair.glb"),
            asset("chair.usdz"),
            asset("chair.glb"), // collision
            asset("lamp.glb"),
            asset("poster.png"),
            asset("tour.mp4"),
        ];
        let grouped = group_assets(&input);
        assert_eq!(grouped.accounted(), input.len());
    }

    #[test]
    fn gltf_shares_the_glb_slot() {
        let grouped = group_assets(&[asset("scene.gltf"), asset("scene.usdz")]);
        assert!(grouped.groups["scene"].is_unified());
    }

    #[test]
    fn empty_input_is_empty_output() {
        let grouped = group_assets(&[]);
        assert!(grouped.groups.is_empty());
        assert!(grouped.standalone.is_empty());
        assert_eq!(grouped.accounted(), 0);
    }
}
