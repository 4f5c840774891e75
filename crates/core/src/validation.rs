//! Pre-simulation validation and statistical helpers.
//!
//! Coverage between the estimate set and the electoral-vote table is checked
//! once, fatally, before any trial runs: a gap in either direction would
//! silently corrupt the national vote total.

use crate::error::ForecastError;
use crate::region::{ElectoralMap, EstimateSet};

/// Verifies that estimates and the electoral-vote table cover the same
/// regions.
///
/// # Errors
///
/// * [`ForecastError::EmptyRegionSet`]: a mapped region has no estimate (no
///   qualifying polls and no assumption entry).
/// * [`ForecastError::MissingRegionMapping`]: an estimated region has no vote
///   allocation.
pub fn validate_coverage(estimates: &EstimateSet, map: &ElectoralMap) -> Result<(), ForecastError> {
    for (region, _) in map.iter() {
        if !estimates.contains_key(region) {
            return Err(ForecastError::EmptyRegionSet {
                region: region.to_string(),
            });
        }
    }

    for region in estimates.keys() {
        if !map.contains(region) {
            return Err(ForecastError::MissingRegionMapping {
                region: region.clone(),
            });
        }
    }

    Ok(())
}

/// Calculates the Wilson score confidence interval for a proportion.
///
/// The Wilson score interval has better coverage than the normal
/// approximation near 0 and 1 and for small sample sizes, which is exactly
/// where simulated win probabilities live. The CLI reports it next to the
/// point estimate so the probability resolution at a given trial count is
/// visible.
///
/// # Arguments
/// * `wins` - Number of successes (trials won)
/// * `n` - Total number of trials
/// * `z` - Z-score for the confidence level (1.96 for 95%)
///
/// # Returns
/// Tuple of (lower_bound, upper_bound), clamped to [0, 1].
#[must_use]
pub fn wilson_ci(wins: u64, n: u64, z: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }

    let n_f = n as f64;
    let p = wins as f64 / n_f;
    let z_sq = z * z;

    let denominator = 1.0 + z_sq / n_f;
    let center = p + z_sq / (2.0 * n_f);

    // Under the square root: p(1-p)/n + z^2/(4n^2)
    let variance_term = p * (1.0 - p) / n_f;
    let correction_term = z_sq / (4.0 * n_f * n_f);
    let spread = z * (variance_term + correction_term).sqrt();

    let lower = (center - spread) / denominator;
    let upper = (center + spread) / denominator;

    (lower.max(0.0), upper.min(1.0))
}
