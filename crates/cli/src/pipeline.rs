//! Pipeline wiring shared by the CLI commands.
//!
//! Each stage is a pure transformation over the previous stage's output, so
//! the commands compose them without shared mutable state.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use electcast_core::{AppConfig, CandidatePair, ElectoralMap, EstimateSet};
use electcast_data::load_poll_records;
use electcast_model::{AggregationMode, Aggregator, AssumptionOverlay};
use std::path::Path;

use crate::presets;

#[must_use]
pub fn candidate_pair(config: &AppConfig) -> CandidatePair {
    CandidatePair::new(config.candidates.a.clone(), config.candidates.b.clone())
}

/// Builds the electoral-vote table from config (or the US preset) and checks
/// it against the expected national total. A mismatch is fatal here, before
/// anything downstream can consume the table.
pub fn electoral_map(config: &AppConfig) -> Result<ElectoralMap> {
    let map = match &config.electoral.votes {
        Some(votes) => votes.iter().map(|(region, count)| (region.clone(), *count)).collect(),
        None => presets::electoral_map(),
    };
    map.validate_total(config.electoral.expected_total)?;
    Ok(map)
}

#[must_use]
pub fn assumption_overlay(config: &AppConfig) -> AssumptionOverlay {
    match &config.assumptions {
        Some(entries) => AssumptionOverlay::from(entries.clone()),
        None => presets::assumption_overlay(),
    }
}

pub fn aggregation_mode(config: &AppConfig) -> Result<AggregationMode> {
    config
        .aggregation
        .mode
        .parse()
        .map_err(|reason: String| anyhow!(reason))
}

/// Ingests polls, aggregates them per region, and applies the assumption
/// overlay. Returns the estimate set ready for validation and simulation.
pub fn build_estimates(
    config: &AppConfig,
    polls_csv: &Path,
    reference_date: NaiveDate,
) -> Result<EstimateSet> {
    let (records, _report) = load_poll_records(polls_csv)?;
    let aggregator = Aggregator::new(candidate_pair(config), config.weighting.clone())
        .with_mode(aggregation_mode(config)?);
    let estimates = aggregator.aggregate(&records, reference_date);
    Ok(assumption_overlay(config).apply(&estimates))
}
