//! Poll aggregation: one weighted estimate per region.
//!
//! Raw poll records are reduced to a single signed differential per region
//! using the recency/quality weights from [`crate::weight`]. Regions without
//! any qualifying records produce no entry at all (absence, not zeros), and
//! it is the assumption overlay's job to fill them, or validation fails
//! before simulation.

use chrono::NaiveDate;
use electcast_core::{CandidatePair, EstimateSet, PollRecord, RegionEstimate, Side, WeightingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

use crate::weight::poll_weight;

/// Grouping policy for reducing poll records to a region differential.
///
/// The two modes are not numerically equivalent: they diverge whenever a poll
/// instance is missing one candidate's row or coverage differs by candidate.
/// The mode is explicit per deployment and never blended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationMode {
    /// Group rows by (region, sample group). Each complete instance yields an
    /// internal A−B differential, weighted once per instance; the region value
    /// is the weight-denominated average of instance differentials. Instances
    /// missing either candidate's row are dropped.
    #[default]
    PerPollInstance,
    /// Average each candidate's support independently with per-record
    /// weights, then take the difference of the two averages.
    PerCandidate,
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-poll-instance" => Ok(Self::PerPollInstance),
            "per-candidate" => Ok(Self::PerCandidate),
            other => Err(format!(
                "unknown aggregation mode {other:?} (expected \"per-poll-instance\" or \"per-candidate\")"
            )),
        }
    }
}

/// Reduces raw poll records into per-region estimates.
pub struct Aggregator {
    pair: CandidatePair,
    weighting: WeightingConfig,
    mode: AggregationMode,
}

impl Aggregator {
    /// Creates an aggregator for a candidate pair with the given weighting
    /// parameters, in the default [`AggregationMode::PerPollInstance`] mode.
    #[must_use]
    pub fn new(pair: CandidatePair, weighting: WeightingConfig) -> Self {
        Self {
            pair,
            weighting,
            mode: AggregationMode::default(),
        }
    }

    /// Sets the grouping policy.
    #[must_use]
    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Aggregates records into one estimate per region.
    ///
    /// Records for candidates outside the tracked pair are discarded. A region
    /// whose qualifying records all carry zero weight yields no estimate
    /// rather than a 0/0 differential. The function holds no mutable state, so
    /// repeated calls on the same input produce identical output.
    #[must_use]
    pub fn aggregate(&self, records: &[PollRecord], reference_date: NaiveDate) -> EstimateSet {
        let estimates = match self.mode {
            AggregationMode::PerPollInstance => self.aggregate_per_instance(records, reference_date),
            AggregationMode::PerCandidate => self.aggregate_per_candidate(records, reference_date),
        };
        debug!(
            regions = estimates.len(),
            records = records.len(),
            mode = ?self.mode,
            "aggregated poll records"
        );
        estimates
    }

    fn aggregate_per_instance(&self, records: &[PollRecord], reference_date: NaiveDate) -> EstimateSet {
        struct Instance {
            a: Option<f64>,
            b: Option<f64>,
            // Rows of one instance share a field period and grade, so the
            // weight is fixed by whichever row opens the instance.
            weight: f64,
        }

        let mut instances: BTreeMap<(String, String), Instance> = BTreeMap::new();
        for record in records {
            let Some(side) = self.pair.side_of(&record.candidate) else {
                continue;
            };
            let instance = instances
                .entry((record.region.clone(), record.sample_group_id.clone()))
                .or_insert_with(|| Instance {
                    a: None,
                    b: None,
                    weight: poll_weight(
                        record.observation_date,
                        record.source_quality,
                        reference_date,
                        &self.weighting,
                    ),
                });
            match side {
                Side::A => instance.a = Some(record.support_pct),
                Side::B => instance.b = Some(record.support_pct),
            }
        }

        let mut sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for ((region, _), instance) in instances {
            let (Some(a), Some(b)) = (instance.a, instance.b) else {
                // Incomplete instance: no internal differential exists.
                continue;
            };
            let (weighted_diff, total_weight) = sums.entry(region).or_insert((0.0, 0.0));
            *weighted_diff += instance.weight * (a - b);
            *total_weight += instance.weight;
        }

        sums.into_iter()
            .filter(|(_, (_, total_weight))| *total_weight > 0.0)
            .map(|(region, (weighted_diff, total_weight))| {
                let estimate =
                    RegionEstimate::from_differential(region.clone(), weighted_diff / total_weight);
                (region, estimate)
            })
            .collect()
    }

    fn aggregate_per_candidate(&self, records: &[PollRecord], reference_date: NaiveDate) -> EstimateSet {
        #[derive(Default)]
        struct SideSums {
            weighted_support: f64,
            weight: f64,
        }

        let mut sums: BTreeMap<String, (SideSums, SideSums)> = BTreeMap::new();
        for record in records {
            let Some(side) = self.pair.side_of(&record.candidate) else {
                continue;
            };
            let weight = poll_weight(
                record.observation_date,
                record.source_quality,
                reference_date,
                &self.weighting,
            );
            let (a_sums, b_sums) = sums.entry(record.region.clone()).or_default();
            let side_sums = match side {
                Side::A => a_sums,
                Side::B => b_sums,
            };
            side_sums.weighted_support += weight * record.support_pct;
            side_sums.weight += weight;
        }

        sums.into_iter()
            .filter_map(|(region, (a_sums, b_sums))| {
                if a_sums.weight <= 0.0 || b_sums.weight <= 0.0 {
                    // One side entirely unpolled: no differential exists.
                    return None;
                }
                let support_a = a_sums.weighted_support / a_sums.weight;
                let support_b = b_sums.weighted_support / b_sums.weight;
                let estimate = RegionEstimate::from_support(region.clone(), support_a, support_b);
                Some((region, estimate))
            })
            .collect()
    }
}
