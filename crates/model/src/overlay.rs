//! Fixed support assumptions for under-polled regions.

use electcast_core::{EstimateSet, RegionEstimate, SupportPair};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed support pairs for regions whose polling is too thin or unreliable to
/// aggregate.
///
/// Application is an immutable transformation: a new estimate collection is
/// returned in which every listed region is overwritten, or inserted if
/// absent, with an estimate rebuilt from its fixed support pair, so the
/// differential and projected winner can never drift from the support values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssumptionOverlay {
    entries: BTreeMap<String, SupportPair>,
}

impl AssumptionOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, a: f64, b: f64) {
        self.entries.insert(region.into(), SupportPair { a, b });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns a new estimate set with every overlay region force-set.
    #[must_use]
    pub fn apply(&self, estimates: &EstimateSet) -> EstimateSet {
        let mut result = estimates.clone();
        for (region, support) in &self.entries {
            result.insert(
                region.clone(),
                RegionEstimate::from_support(region.clone(), support.a, support.b),
            );
        }
        result
    }
}

impl From<BTreeMap<String, SupportPair>> for AssumptionOverlay {
    fn from(entries: BTreeMap<String, SupportPair>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electcast_core::Side;

    #[test]
    fn listed_region_is_overwritten() {
        let mut estimates = EstimateSet::new();
        estimates.insert(
            "Hawaii".to_string(),
            RegionEstimate::from_support("Hawaii", 55.0, 40.0),
        );

        let mut overlay = AssumptionOverlay::new();
        overlay.insert("Hawaii", 30.7, 63.4);
        let result = overlay.apply(&estimates);

        let hawaii = &result["Hawaii"];
        assert!((hawaii.support_a - 30.7).abs() < 1e-12);
        assert!((hawaii.differential - (30.7 - 63.4)).abs() < 1e-9);
        assert_eq!(hawaii.projected_winner, Side::B);
    }

    #[test]
    fn missing_region_is_inserted() {
        let estimates = EstimateSet::new();

        let mut overlay = AssumptionOverlay::new();
        overlay.insert("District of Columbia", 6.7, 90.0);
        let result = overlay.apply(&estimates);

        assert_eq!(result.len(), 1);
        assert_eq!(result["District of Columbia"].projected_winner, Side::B);
    }

    #[test]
    fn unlisted_regions_pass_through_unchanged() {
        let mut estimates = EstimateSet::new();
        estimates.insert(
            "Ohio".to_string(),
            RegionEstimate::from_support("Ohio", 51.0, 44.0),
        );

        let mut overlay = AssumptionOverlay::new();
        overlay.insert("Hawaii", 30.7, 63.4);
        let result = overlay.apply(&estimates);

        assert_eq!(result["Ohio"], estimates["Ohio"]);
    }

    #[test]
    fn apply_does_not_mutate_the_input() {
        let mut estimates = EstimateSet::new();
        estimates.insert(
            "Hawaii".to_string(),
            RegionEstimate::from_support("Hawaii", 55.0, 40.0),
        );
        let snapshot = estimates.clone();

        let mut overlay = AssumptionOverlay::new();
        overlay.insert("Hawaii", 30.7, 63.4);
        let _ = overlay.apply(&estimates);

        assert_eq!(estimates, snapshot);
    }
}
