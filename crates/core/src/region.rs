//! Per-region estimates and the electoral-vote table.

use crate::error::ForecastError;
use crate::poll::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping of region name to its aggregated estimate, ordered by region.
pub type EstimateSet = BTreeMap<String, RegionEstimate>;

/// Aggregated two-candidate standing in one region.
///
/// The differential and projected winner are always derived from the support
/// pair in a single step; there is no code path that updates one without the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEstimate {
    /// Contest unit this estimate covers.
    pub region: String,
    /// Estimated support for candidate A, percent.
    pub support_a: f64,
    /// Estimated support for candidate B, percent.
    pub support_b: f64,
    /// Signed support gap, `support_a - support_b`. Positive favors A.
    pub differential: f64,
    /// Winner under the strict `>` convention (ties go to B).
    pub projected_winner: Side,
}

impl RegionEstimate {
    /// Builds an estimate from a support pair, deriving the differential and
    /// projected winner together.
    #[must_use]
    pub fn from_support(region: impl Into<String>, support_a: f64, support_b: f64) -> Self {
        let differential = support_a - support_b;
        Self {
            region: region.into(),
            support_a,
            support_b,
            differential,
            projected_winner: Side::from_differential(differential),
        }
    }

    /// Builds an estimate from a bare differential.
    ///
    /// The support columns carry the positive part of the margin for whichever
    /// side leads; aggregation over per-instance differentials has no absolute
    /// support levels left to preserve.
    #[must_use]
    pub fn from_differential(region: impl Into<String>, differential: f64) -> Self {
        Self::from_support(region, differential.max(0.0), (-differential).max(0.0))
    }
}

/// Static region → electoral-vote table.
///
/// Populated from configuration or a preset, then checked once against the
/// expected national total before any simulation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectoralMap {
    votes: BTreeMap<String, u32>,
}

impl ElectoralMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, votes: u32) {
        self.votes.insert(region.into(), votes);
    }

    /// Vote count for a region, if it is in the table.
    #[must_use]
    pub fn votes(&self, region: &str) -> Option<u32> {
        self.votes.get(region).copied()
    }

    #[must_use]
    pub fn contains(&self, region: &str) -> bool {
        self.votes.contains_key(region)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.votes.iter().map(|(region, votes)| (region.as_str(), *votes))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Sum of all vote allocations.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.votes.values().sum()
    }

    /// Minimum vote count that constitutes a majority: `floor(total / 2) + 1`.
    #[must_use]
    pub fn majority_threshold(&self) -> u32 {
        self.total() / 2 + 1
    }

    /// Checks the table against the expected national total.
    ///
    /// # Errors
    /// Returns [`ForecastError::InvariantViolation`] carrying the computed
    /// total when it does not match.
    pub fn validate_total(&self, expected: u32) -> Result<(), ForecastError> {
        let actual = self.total();
        if actual == expected {
            Ok(())
        } else {
            Err(ForecastError::InvariantViolation { expected, actual })
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ElectoralMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            votes: iter
                .into_iter()
                .map(|(region, votes)| (region.into(), votes))
                .collect(),
        }
    }
}
