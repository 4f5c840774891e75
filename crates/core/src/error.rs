//! Error taxonomy for the forecasting pipeline.
//!
//! Malformed input is recovered locally at ingestion by excluding the
//! offending record; everything else here is fatal and stops the pipeline
//! before a simulation summary exists.

use thiserror::Error;

/// Errors raised across the forecasting pipeline.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A record that cannot be interpreted (unparseable date, out-of-range
    /// percentage or grade, missing field). Ingestion excludes the record and
    /// counts it; this variant never substitutes a guessed value.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A region carries an estimate but has no electoral-vote allocation.
    /// Skipping it silently would corrupt the national vote total, so this is
    /// fatal before simulation.
    #[error("region {region:?} has no entry in the electoral-vote table")]
    MissingRegionMapping {
        /// Region present in the estimates but absent from the vote table.
        region: String,
    },

    /// The electoral-vote table does not sum to the expected national total.
    #[error("electoral-vote total is {actual}, expected {expected}")]
    InvariantViolation {
        /// Configured national total.
        expected: u32,
        /// Total computed from the table.
        actual: u32,
    },

    /// A region in the electoral-vote table has neither a poll-derived
    /// estimate nor an assumption entry. An incomplete map cannot produce a
    /// valid national outcome.
    #[error("region {region:?} has no poll-derived estimate and no assumption entry")]
    EmptyRegionSet {
        /// Region without any estimate.
        region: String,
    },

    /// Simulation parameters rejected before any random draw.
    #[error("invalid simulation configuration: {0}")]
    SimulationConfig(String),

    /// IO failure surfaced from a collaborator.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
