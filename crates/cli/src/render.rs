#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

//! Text rendering of estimates and simulation results.

use electcast_core::{wilson_ci, CandidatePair, ElectoralMap, EstimateSet, Side};
use electcast_sim::SimulationSummary;
use std::collections::BTreeMap;

/// Display range for the per-region lean gauge, in points of differential.
const LEAN_DISPLAY_RANGE: f64 = 30.0;
/// Width of the mean-electoral-votes bars.
const BAR_WIDTH: f64 = 40.0;
/// Cells in a lean gauge strip.
const GAUGE_CELLS: usize = 21;

/// Clamps a differential to the display range and rescales it to [0, 1]
/// (0 = strongest lean to candidate B, 1 = strongest lean to candidate A).
#[must_use]
pub fn lean_intensity(differential: f64) -> f64 {
    let capped = differential.clamp(-LEAN_DISPLAY_RANGE, LEAN_DISPLAY_RANGE);
    (capped + LEAN_DISPLAY_RANGE) / (2.0 * LEAN_DISPLAY_RANGE)
}

fn lean_gauge(differential: f64) -> String {
    let marker = (lean_intensity(differential) * (GAUGE_CELLS - 1) as f64).round() as usize;
    (0..GAUGE_CELLS)
        .map(|cell| {
            if cell == marker {
                '●'
            } else if cell == GAUGE_CELLS / 2 {
                '┼'
            } else {
                '─'
            }
        })
        .collect()
}

pub struct SummaryFormatter;

impl SummaryFormatter {
    #[must_use]
    pub fn format(pair: &CandidatePair, summary: &SimulationSummary, map: &ElectoralMap) -> String {
        let mut output = String::new();
        let total = f64::from(map.total());

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    FORECAST RESULTS                           \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("Win Probability\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for side in [Side::A, Side::B] {
            let (ci_lower, ci_upper) = wilson_ci(summary.wins(side), summary.trials, 1.96);
            output.push_str(&format!(
                "{:<22} {:>6.1}%   [{:.1}%, {:.1}%]\n",
                pair.name(side),
                summary.win_probability(side) * 100.0,
                ci_lower * 100.0,
                ci_upper * 100.0
            ));
        }
        if summary.tie_probability > 0.0 {
            output.push_str(&format!(
                "{:<22} {:>6.1}%\n",
                "No majority",
                summary.tie_probability * 100.0
            ));
        }
        output.push('\n');

        output.push_str("Mean Electoral Votes\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for side in [Side::A, Side::B] {
            let votes = summary.mean_votes(side);
            let bar_len = (votes / total * BAR_WIDTH).round() as usize;
            output.push_str(&format!(
                "{:<22} {:<40} {:>6.1}\n",
                pair.name(side),
                "█".repeat(bar_len),
                votes
            ));
        }
        output.push('\n');

        output.push_str(&format!(
            "Trials:                {}   (majority threshold {} of {})\n",
            summary.trials,
            map.majority_threshold(),
            map.total()
        ));

        output
    }
}

pub struct EstimateTableFormatter;

impl EstimateTableFormatter {
    #[must_use]
    pub fn format(
        estimates: &EstimateSet,
        map: &ElectoralMap,
        codes: &BTreeMap<&str, &str>,
        pair: &CandidatePair,
    ) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:<4} {:>8}  {:<21} {:<22} {:>4}\n",
            "Region", "Code", "Diff", "Lean", "Projected Winner", "EV"
        ));
        output.push_str("───────────────────────────────────────────────────────────────────────────────────────\n");

        for (region, estimate) in estimates {
            let code = codes.get(region.as_str()).copied().unwrap_or("");
            let votes = map
                .votes(region)
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            output.push_str(&format!(
                "{:<22} {:<4} {:>+8.2}  {:<21} {:<22} {:>4}\n",
                region,
                code,
                estimate.differential,
                lean_gauge(estimate.differential),
                pair.name(estimate.projected_winner),
                votes
            ));
        }

        output
    }
}

pub struct HistoryFormatter;

impl HistoryFormatter {
    #[must_use]
    pub fn format(records: &[electcast_data::RunRecord]) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>8} {:>8} {:>6} {:>8} {:>8} {:>8}\n",
            "Timestamp", "P(A)", "P(B)", "P(tie)", "EV(A)", "EV(B)", "Trials"
        ));
        output.push_str("───────────────────────────────────────────────────────────────────────────\n");

        for record in records {
            output.push_str(&format!(
                "{:<22} {:>7.1}% {:>7.1}% {:>5.1}% {:>8.1} {:>8.1} {:>8}\n",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                record.win_probability_a * 100.0,
                record.win_probability_b * 100.0,
                record.tie_probability * 100.0,
                record.mean_votes_a,
                record.mean_votes_b,
                record.trials
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electcast_core::RegionEstimate;

    #[test]
    fn lean_intensity_centers_and_clamps() {
        assert!((lean_intensity(0.0) - 0.5).abs() < f64::EPSILON);
        assert!((lean_intensity(30.0) - 1.0).abs() < f64::EPSILON);
        assert!((lean_intensity(-30.0) - 0.0).abs() < f64::EPSILON);
        // Beyond the display range the gauge saturates.
        assert!((lean_intensity(55.0) - 1.0).abs() < f64::EPSILON);
        assert!((lean_intensity(-55.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_formatter_names_both_candidates() {
        let pair = CandidatePair::new("Alpha", "Beta");
        let map = ElectoralMap::from_iter([("North", 5u32), ("South", 5)]);
        let summary = SimulationSummary {
            win_probability_a: 0.7,
            win_probability_b: 0.3,
            tie_probability: 0.0,
            mean_votes_a: 6.2,
            mean_votes_b: 3.8,
            trials: 1000,
        };

        let text = SummaryFormatter::format(&pair, &summary, &map);

        assert!(text.contains("Alpha"));
        assert!(text.contains("Beta"));
        assert!(text.contains("70.0%"));
        assert!(text.contains("threshold 6 of 10"));
        assert!(!text.contains("No majority"));
    }

    #[test]
    fn summary_formatter_reports_reachable_ties() {
        let pair = CandidatePair::new("Alpha", "Beta");
        let map = ElectoralMap::from_iter([("North", 5u32), ("South", 5)]);
        let summary = SimulationSummary {
            win_probability_a: 0.5,
            win_probability_b: 0.4,
            tie_probability: 0.1,
            mean_votes_a: 5.1,
            mean_votes_b: 4.9,
            trials: 1000,
        };

        let text = SummaryFormatter::format(&pair, &summary, &map);

        assert!(text.contains("No majority"));
    }

    #[test]
    fn estimate_table_lists_each_region_once() {
        let pair = CandidatePair::new("Alpha", "Beta");
        let map = ElectoralMap::from_iter([("North", 5u32)]);
        let mut estimates = EstimateSet::new();
        estimates.insert(
            "North".to_string(),
            RegionEstimate::from_support("North", 52.0, 44.0),
        );
        let codes = BTreeMap::from([("North", "NO")]);

        let text = EstimateTableFormatter::format(&estimates, &map, &codes, &pair);

        assert_eq!(text.matches("North").count(), 1);
        assert!(text.contains("+8.00"));
        assert!(text.contains("NO"));
    }
}
