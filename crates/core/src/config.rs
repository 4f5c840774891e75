//! Application configuration structures.
//!
//! Override tables (electoral votes, assumption entries) live in the
//! configuration rather than as module-level constants so tests and smaller
//! deployments can substitute toy maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub candidates: CandidatesConfig,
    pub weighting: WeightingConfig,
    pub aggregation: AggregationConfig,
    pub simulation: SimulationSettings,
    pub electoral: ElectoralConfig,
    pub paths: PathsConfig,
    /// Fixed support pairs for under-polled regions. `None` selects the
    /// built-in preset table; an explicit empty table disables the overlay.
    pub assumptions: Option<BTreeMap<String, SupportPair>>,
}

/// The two tracked candidates. Positive differentials favor `a`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatesConfig {
    pub a: String,
    pub b: String,
}

impl Default for CandidatesConfig {
    fn default() -> Self {
        Self {
            a: "Donald Trump".to_string(),
            b: "Joe Biden".to_string(),
        }
    }
}

/// Poll weighting parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    /// Half-life of the recency decay, in days.
    pub half_life_days: f64,
    /// Maximum attainable pollster grade in the input domain.
    pub max_grade: f64,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            half_life_days: 180.0,
            max_grade: 3.0,
        }
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Grouping policy: `per-poll-instance` or `per-candidate`. Parsed by the
    /// model crate's `AggregationMode`.
    pub mode: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            mode: "per-poll-instance".to_string(),
        }
    }
}

/// Monte Carlo simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of simulated elections per run.
    pub trials: u64,
    /// Standard deviation of the shared national error term, in points.
    pub national_stddev: f64,
    /// Standard deviation of the independent per-region error term, in points.
    pub regional_stddev: f64,
    /// Seed for reproducible runs. Unset draws one from entropy.
    pub seed: Option<u64>,
    /// Worker threads for the trial loop.
    pub workers: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            trials: 10_000,
            national_stddev: 4.0,
            regional_stddev: 3.0,
            seed: None,
            workers: 1,
        }
    }
}

/// Electoral-vote table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectoralConfig {
    /// National total the vote table must sum to.
    pub expected_total: u32,
    /// Region → vote-count table. `None` selects the built-in preset.
    pub votes: Option<BTreeMap<String, u32>>,
}

impl Default for ElectoralConfig {
    fn default() -> Self {
        Self {
            expected_total: 538,
            votes: None,
        }
    }
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw poll CSV.
    pub polls_csv: String,
    /// Append-only forecast run log (JSONL).
    pub result_log: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            polls_csv: "data/president_polls.csv".to_string(),
            result_log: "data/forecast_log.jsonl".to_string(),
        }
    }
}

/// A fixed (candidate A, candidate B) support pair for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportPair {
    pub a: f64,
    pub b: f64,
}
