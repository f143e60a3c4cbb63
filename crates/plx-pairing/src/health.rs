//! Cross-platform completeness aggregation.
//!
//! Pure aggregation over one grouping pass, no I/O. The summary feeds the
//! operator dashboard's "asset health" panel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::group::{CompanionGroup, GroupedAssets};

/// Per-collection companion completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HealthSummary {
    pub total_groups: usize,
    pub complete_groups: usize,
    pub incomplete_groups: usize,
    /// Exact file names whose upload would complete the incomplete groups,
    /// in base-name order.
    pub missing_files: Vec<String>,
    /// `100 * complete / total`, or `100` with zero groups (no data is not
    /// "0% complete").
    pub completion_rate: f64,
}

/// Summarize one grouping pass.
#[must_use]
pub fn summarize(grouped: &GroupedAssets) -> HealthSummary {
    let total_groups = grouped.groups.len();
    let complete_groups = grouped
        .groups
        .values()
        .filter(|g| g.is_unified())
        .count();
    let missing_files: Vec<String> = grouped
        .groups
        .values()
        .filter_map(CompanionGroup::missing)
        .map(|m| m.expected_file_name)
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let completion_rate = if total_groups == 0 {
        100.0
    } else {
        100.0 * complete_groups as f64 / total_groups as f64
    };

    HealthSummary {
        total_groups,
        complete_groups,
        incomplete_groups: total_groups - complete_groups,
        missing_files,
        completion_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_assets;
    use chrono::DateTime;
    use plx_core::{AssetKind, ModelAsset};
    use pretty_assertions::assert_eq;

    fn asset(file_name: &str) -> ModelAsset {
        ModelAsset {
            name: format!("models/{file_name}"),
            file_name: file_name.to_string(),
            file_type: AssetKind::from_file_name(file_name),
            size_bytes: 2048,
            owner_id: "user_1".to_string(),
            uploaded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn half_complete_collection() {
        let grouped = group_assets(&[
            asset("chair.glb"),
            asset("chair.usdz"),
            asset("lamp.glb"),
        ]);
        let summary = summarize(&grouped);

        assert_eq!(summary.total_groups, 2);
        assert_eq!(summary.complete_groups, 1);
        assert_eq!(summary.incomplete_groups, 1);
        assert_eq!(summary.missing_files, vec!["lamp.usdz"]);
        assert!((summary.completion_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_map_is_vacuously_complete() {
        let summary = summarize(&group_assets(&[]));
        assert_eq!(summary.total_groups, 0);
        assert!((summary.completion_rate - 100.0).abs() < f64::EPSILON);
        assert!(summary.missing_files.is_empty());
    }

    #[test]
    fn rate_stays_in_range() {
        // All incomplete
        let none_done = summarize(&group_assets(&[asset("a.glb"), asset("b.usdz")]));
        assert!((none_done.completion_rate - 0.0).abs() < f64::EPSILON);

        // All complete
        let all_done = summarize(&group_assets(&[
            asset("a.glb"),
            asset("a.usdz"),
            asset("b.glb"),
            asset("b.usdz"),
        ]));
        assert!((all_done.completion_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn standalone_assets_do_not_affect_health() {
        let with_extras = summarize(&group_assets(&[
            asset("chair.glb"),
            asset("chair.usdz"),
            asset("poster.png"),
            asset("tour.mp4"),
        ]));
        assert_eq!(with_extras.total_groups, 1);
        assert!((with_extras.completion_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_files_sorted_by_base_name() {
        let summary = summarize(&group_assets(&[
            asset("zebra.glb"),
            asset("apple.usdz"),
            asset("mango.glb"),
        ]));
        assert_eq!(
            summary.missing_files,
            vec!["apple.glb", "mango.usdz", "zebra.usdz"]
        );
    }

    #[test]
    fn summary_serializes_for_the_dashboard() {
        let summary = summarize(&group_assets(&[asset("lamp.glb")]));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_groups"], 1);
        assert_eq!(json["completion_rate"], 0.0);
        assert_eq!(json["missing_files"][0], "lamp.usdz");
    }
}
