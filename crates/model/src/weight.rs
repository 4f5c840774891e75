//! Poll weighting: exponential recency decay scaled by pollster quality.

use chrono::NaiveDate;
use electcast_core::WeightingConfig;

/// Computes the weight of one poll observation against a reference date.
///
/// `age_factor = 0.5 ^ (days / half_life_days)` where `days` is the elapsed
/// time from observation to reference. A future-dated observation has negative
/// elapsed days and therefore an age factor above 1; that is deliberate and
/// not clamped, so a run over future-dated input reflects the input as given.
///
/// `quality_factor = source_quality / max_grade`, linear in the grade. Grades
/// outside the input domain are not rejected here; range validation belongs
/// to ingestion.
#[must_use]
pub fn poll_weight(
    observation_date: NaiveDate,
    source_quality: f64,
    reference_date: NaiveDate,
    params: &WeightingConfig,
) -> f64 {
    let days_passed = (reference_date - observation_date).num_days() as f64;
    let age_factor = 0.5_f64.powf(days_passed / params.half_life_days);
    let quality_factor = source_quality / params.max_grade;
    age_factor * quality_factor
}
