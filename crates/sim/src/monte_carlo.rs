//! Monte Carlo simulation of the electoral outcome.
//!
//! Each trial perturbs every region's differential with one national error
//! term shared across regions (correlated systematic polling error) and an
//! independent per-region error term (idiosyncratic local error), resolves a
//! winner per region, and tallies electoral votes. Individual trials are
//! discarded; only the running aggregate survives.
//!
//! # Example
//!
//! ```ignore
//! use electcast_sim::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig::new(10_000, 4.0, 3.0).with_seed(42);
//! let summary = Simulator::new(config).run(&estimates, &electoral_map)?;
//! println!("P(A wins) = {:.3}", summary.win_probability_a);
//! ```

use electcast_core::{validate_coverage, ElectoralMap, EstimateSet, ForecastError, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocate::{allocate_votes, ElectoralTally};

/// Configuration for the outcome simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated elections. Around 1 000 gives a probability
    /// resolution of roughly three points; see `wilson_ci` for the interval.
    pub trials: u64,
    /// Standard deviation of the shared national error, in points.
    pub national_stddev: f64,
    /// Standard deviation of the independent per-region error, in points.
    pub regional_stddev: f64,
    /// Optional seed for reproducible results.
    pub seed: Option<u64>,
    /// Worker threads for the trial loop.
    pub workers: usize,
}

impl Default for SimulationConfig {
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

impl SimulationConfig {
    /// Creates a configuration with the specified parameters.
    #[must_use]
    pub fn new(trials: u64, national_stddev: f64, regional_stddev: f64) -> Self {
        Self {
            trials,
            national_stddev,
            regional_stddev,
            ..Default::default()
        }
    }

    /// Sets a seed for reproducible simulations.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the worker-thread count for the trial loop.
    ///
    /// A seeded run is reproducible for a fixed worker count: each worker's
    /// random stream derives from the base seed and the worker index.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Rejects invalid parameters. Runs before any random draw.
    ///
    /// # Errors
    /// Returns [`ForecastError::SimulationConfig`] for zero trials, a
    /// negative or non-finite standard deviation, or zero workers.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.trials == 0 {
            return Err(ForecastError::SimulationConfig(
                "trials must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("national_stddev", self.national_stddev),
            ("regional_stddev", self.regional_stddev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::SimulationConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.workers == 0 {
            return Err(ForecastError::SimulationConfig(
                "workers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregate outcome statistics across all trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Share of trials candidate A reached the majority threshold.
    pub win_probability_a: f64,
    /// Share of trials candidate B reached the majority threshold.
    pub win_probability_b: f64,
    /// Share of trials in which neither side reached the threshold (an exact
    /// 269–269 split under the default map). Counts as a win for neither, so
    /// the three probabilities always sum to one.
    pub tie_probability: f64,
    /// Mean electoral votes for candidate A, zero-vote trials included.
    pub mean_votes_a: f64,
    /// Mean electoral votes for candidate B, zero-vote trials included.
    pub mean_votes_b: f64,
    /// Number of trials the summary aggregates.
    pub trials: u64,
}

impl SimulationSummary {
    #[must_use]
    pub fn win_probability(&self, side: Side) -> f64 {
        match side {
            Side::A => self.win_probability_a,
            Side::B => self.win_probability_b,
        }
    }

    #[must_use]
    pub fn mean_votes(&self, side: Side) -> f64 {
        match side {
            Side::A => self.mean_votes_a,
            Side::B => self.mean_votes_b,
        }
    }

    /// Win count implied by a side's probability, for interval reporting.
    #[must_use]
    pub fn wins(&self, side: Side) -> u64 {
        (self.win_probability(side) * self.trials as f64).round() as u64
    }
}

/// Running totals across trials.
///
/// All fields are plain sums, so partial accumulators from worker threads
/// merge by addition in any order.
#[derive(Debug, Clone, Copy, Default)]
struct TrialAccumulator {
    wins_a: u64,
    wins_b: u64,
    ties: u64,
    votes_a: u64,
    votes_b: u64,
    trials: u64,
}

impl TrialAccumulator {
    fn record(&mut self, tally: ElectoralTally, threshold: u32) {
        match tally.winner(threshold) {
            Some(Side::A) => self.wins_a += 1,
            Some(Side::B) => self.wins_b += 1,
            None => self.ties += 1,
        }
        self.votes_a += u64::from(tally.a);
        self.votes_b += u64::from(tally.b);
        self.trials += 1;
    }

    fn merge(&mut self, other: Self) {
        self.wins_a += other.wins_a;
        self.wins_b += other.wins_b;
        self.ties += other.ties;
        self.votes_a += other.votes_a;
        self.votes_b += other.votes_b;
        self.trials += other.trials;
    }

    fn summarize(&self) -> SimulationSummary {
        let trials = self.trials as f64;
        SimulationSummary {
            win_probability_a: self.wins_a as f64 / trials,
            win_probability_b: self.wins_b as f64 / trials,
            tie_probability: self.ties as f64 / trials,
            mean_votes_a: self.votes_a as f64 / trials,
            mean_votes_b: self.votes_b as f64 / trials,
            trials: self.trials,
        }
    }
}

/// Monte Carlo simulator over a validated estimate set.
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator with the given configuration.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Creates a simulator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SimulationConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the full simulation.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::SimulationConfig`]: invalid parameters, rejected
    ///   before any random draw.
    /// * [`ForecastError::EmptyRegionSet`] /
    ///   [`ForecastError::MissingRegionMapping`]: coverage gaps between the
    ///   estimates and the vote table, rejected before any trial runs.
    pub fn run(
        &self,
        estimates: &EstimateSet,
        map: &ElectoralMap,
    ) -> Result<SimulationSummary, ForecastError> {
        self.config.validate()?;
        validate_coverage(estimates, map)?;

        let base_seed = match self.config.seed {
            Some(seed) => seed,
            None => ChaCha8Rng::from_entropy().gen(),
        };

        let mut accumulator = TrialAccumulator::default();
        if self.config.workers == 1 {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
            accumulator = self.run_trials(estimates, map, &mut rng, self.config.trials)?;
        } else {
            let joined = std::thread::scope(|scope| {
                let handles: Vec<_> = chunk_trials(self.config.trials, self.config.workers)
                    .into_iter()
                    .enumerate()
                    .map(|(index, chunk)| {
                        scope.spawn(move || {
                            let mut rng =
                                ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(index as u64));
                            self.run_trials(estimates, map, &mut rng, chunk)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| handle.join())
                    .collect::<Vec<_>>()
            });
            for result in joined {
                let partial = result.map_err(|_| {
                    ForecastError::SimulationConfig("simulation worker panicked".to_string())
                })??;
                accumulator.merge(partial);
            }
        }

        let summary = accumulator.summarize();
        info!(
            trials = summary.trials,
            p_a = summary.win_probability_a,
            p_b = summary.win_probability_b,
            "simulation complete"
        );
        Ok(summary)
    }

    fn run_trials(
        &self,
        estimates: &EstimateSet,
        map: &ElectoralMap,
        rng: &mut ChaCha8Rng,
        trials: u64,
    ) -> Result<TrialAccumulator, ForecastError> {
        // Normal::new only rejects what validate() already rejected.
        let national = Normal::new(0.0, self.config.national_stddev)
            .map_err(|e| ForecastError::SimulationConfig(e.to_string()))?;
        let regional = Normal::new(0.0, self.config.regional_stddev)
            .map_err(|e| ForecastError::SimulationConfig(e.to_string()))?;
        let threshold = map.majority_threshold();

        let mut accumulator = TrialAccumulator::default();
        let mut winners: Vec<(&str, Side)> = Vec::with_capacity(estimates.len());
        for _ in 0..trials {
            winners.clear();
            // One systematic shift shared by every region in this trial.
            let national_error = national.sample(rng);
            for (region, estimate) in estimates {
                let regional_error = regional.sample(rng);
                let simulated = estimate.differential + national_error + regional_error;
                winners.push((region.as_str(), Side::from_differential(simulated)));
            }
            let tally = allocate_votes(winners.iter().copied(), map)?;
            accumulator.record(tally, threshold);
        }
        Ok(accumulator)
    }
}

/// Splits a trial count into per-worker chunks that sum to the total.
fn chunk_trials(trials: u64, workers: usize) -> Vec<u64> {
    let workers = workers as u64;
    let base = trials / workers;
    let remainder = trials % workers;
    (0..workers)
        .map(|index| base + u64::from(index < remainder))
        .filter(|chunk| *chunk > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use electcast_core::RegionEstimate;

    fn toy_map() -> ElectoralMap {
        ElectoralMap::from_iter([("North", 5u32), ("South", 3), ("East", 2)])
    }

    fn toy_estimates() -> EstimateSet {
        // A holds North and South (8 of 10 votes); B holds East.
        EstimateSet::from([
            (
                "North".to_string(),
                RegionEstimate::from_support("North", 55.0, 45.0),
            ),
            (
                "South".to_string(),
                RegionEstimate::from_support("South", 49.0, 47.0),
            ),
            (
                "East".to_string(),
                RegionEstimate::from_support("East", 44.0, 49.0),
            ),
        ])
    }

    #[test]
    fn config_default_has_expected_values() {
        let config = SimulationConfig::default();

        assert_eq!(config.trials, 10_000);
        assert!((config.national_stddev - 4.0).abs() < f64::EPSILON);
        assert!((config.regional_stddev - 3.0).abs() < f64::EPSILON);
        assert!(config.seed.is_none());
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn config_builders_set_parameters() {
        let config = SimulationConfig::new(500, 2.0, 1.5).with_seed(42).with_workers(4);

        assert_eq!(config.trials, 500);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn zero_trials_rejected_before_any_draw() {
        let config = SimulationConfig::new(0, 4.0, 3.0);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ForecastError::SimulationConfig(_)));
    }

    #[test]
    fn negative_stddev_rejected_before_any_draw() {
        assert!(SimulationConfig::new(100, -1.0, 3.0).validate().is_err());
        assert!(SimulationConfig::new(100, 4.0, -0.5).validate().is_err());
        assert!(SimulationConfig::new(100, f64::NAN, 3.0).validate().is_err());
    }

    #[test]
    fn zero_workers_rejected() {
        let config = SimulationConfig::new(100, 4.0, 3.0).with_workers(0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn run_surfaces_config_errors() {
        let simulator = Simulator::new(SimulationConfig::new(0, 4.0, 3.0));

        let err = simulator.run(&toy_estimates(), &toy_map()).unwrap_err();
        assert!(matches!(err, ForecastError::SimulationConfig(_)));
    }

    #[test]
    fn mapped_region_without_estimate_fails_before_trials() {
        let mut estimates = toy_estimates();
        estimates.remove("East");
        let simulator = Simulator::new(SimulationConfig::new(1000, 4.0, 3.0).with_seed(1));

        let err = simulator.run(&estimates, &toy_map()).unwrap_err();

        match err {
            ForecastError::EmptyRegionSet { region } => assert_eq!(region, "East"),
            other => panic!("expected EmptyRegionSet, got {other:?}"),
        }
    }

    #[test]
    fn estimated_region_without_votes_fails_before_trials() {
        let mut estimates = toy_estimates();
        estimates.insert(
            "West".to_string(),
            RegionEstimate::from_support("West", 50.0, 45.0),
        );
        let simulator = Simulator::new(SimulationConfig::new(1000, 4.0, 3.0).with_seed(1));

        let err = simulator.run(&estimates, &toy_map()).unwrap_err();
        assert!(matches!(err, ForecastError::MissingRegionMapping { .. }));
    }

    #[test]
    fn zero_stddevs_reproduce_projected_winners_every_trial() {
        let config = SimulationConfig::new(100, 0.0, 0.0).with_seed(7);
        let summary = Simulator::new(config).run(&toy_estimates(), &toy_map()).unwrap();

        // A's unperturbed coalition holds 8 of 10 votes, threshold 6.
        assert!((summary.win_probability_a - 1.0).abs() < f64::EPSILON);
        assert!((summary.win_probability_b - 0.0).abs() < f64::EPSILON);
        assert!((summary.mean_votes_a - 8.0).abs() < f64::EPSILON);
        assert!((summary.mean_votes_b - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn probabilities_sum_to_one_with_tie_free_map() {
        // Odd vote total: exactly one side reaches the threshold every trial.
        let map = ElectoralMap::from_iter([("North", 5u32), ("South", 3), ("East", 3)]);
        let config = SimulationConfig::new(2000, 4.0, 3.0).with_seed(11);

        let summary = Simulator::new(config).run(&toy_estimates(), &map).unwrap();

        assert!(
            (summary.win_probability_a + summary.win_probability_b - 1.0).abs() < f64::EPSILON
        );
        assert_eq!(summary.tie_probability, 0.0);
    }

    #[test]
    fn exact_split_counts_for_neither_side() {
        let map = ElectoralMap::from_iter([("Red", 269u32), ("Blue", 269)]);
        let estimates = EstimateSet::from([
            (
                "Red".to_string(),
                RegionEstimate::from_support("Red", 70.0, 25.0),
            ),
            (
                "Blue".to_string(),
                RegionEstimate::from_support("Blue", 25.0, 70.0),
            ),
        ]);
        let config = SimulationConfig::new(50, 0.0, 0.0).with_seed(3);

        let summary = Simulator::new(config).run(&estimates, &map).unwrap();

        assert!((summary.tie_probability - 1.0).abs() < f64::EPSILON);
        assert_eq!(summary.win_probability_a, 0.0);
        assert_eq!(summary.win_probability_b, 0.0);
        assert!(
            (summary.win_probability_a + summary.win_probability_b + summary.tie_probability
                - 1.0)
                .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn national_error_shifts_all_regions_together() {
        // Identical differentials and no regional noise: each trial is
        // all-or-nothing, so mean votes must equal win probability times the
        // map total.
        let map = ElectoralMap::from_iter([("North", 5u32), ("South", 5)]);
        let estimates = EstimateSet::from([
            (
                "North".to_string(),
                RegionEstimate::from_support("North", 49.0, 47.0),
            ),
            (
                "South".to_string(),
                RegionEstimate::from_support("South", 48.0, 46.0),
            ),
        ]);
        // Both differentials are +2; national noise dominates them.
        let config = SimulationConfig::new(4000, 10.0, 0.0).with_seed(17);

        let summary = Simulator::new(config).run(&estimates, &map).unwrap();

        assert!(summary.win_probability_a > 0.0 && summary.win_probability_b > 0.0);
        assert!((summary.mean_votes_a - summary.win_probability_a * 10.0).abs() < 1e-9);
        assert!((summary.mean_votes_b - summary.win_probability_b * 10.0).abs() < 1e-9);
    }

    #[test]
    fn simulation_reproducible_with_seed() {
        let config = SimulationConfig::new(500, 4.0, 3.0).with_seed(12345);

        let first = Simulator::new(config.clone()).run(&toy_estimates(), &toy_map()).unwrap();
        let second = Simulator::new(config).run(&toy_estimates(), &toy_map()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn simulation_differs_with_different_seeds() {
        let first = Simulator::new(SimulationConfig::new(500, 4.0, 3.0).with_seed(11111))
            .run(&toy_estimates(), &toy_map())
            .unwrap();
        let second = Simulator::new(SimulationConfig::new(500, 4.0, 3.0).with_seed(22222))
            .run(&toy_estimates(), &toy_map())
            .unwrap();

        assert_ne!(
            (first.win_probability_a, first.mean_votes_a),
            (second.win_probability_a, second.mean_votes_a)
        );
    }

    #[test]
    fn worker_fanout_preserves_trial_count_and_reproducibility() {
        let config = SimulationConfig::new(1003, 4.0, 3.0).with_seed(9).with_workers(4);

        let first = Simulator::new(config.clone()).run(&toy_estimates(), &toy_map()).unwrap();
        let second = Simulator::new(config).run(&toy_estimates(), &toy_map()).unwrap();

        assert_eq!(first.trials, 1003);
        assert_eq!(first, second);
        assert!(
            (first.win_probability_a
                + first.win_probability_b
                + first.tie_probability
                - 1.0)
                .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn chunk_trials_partitions_exactly() {
        assert_eq!(chunk_trials(10, 3), vec![4, 3, 3]);
        assert_eq!(chunk_trials(2, 4), vec![1, 1]);
        assert_eq!(chunk_trials(8, 2).iter().sum::<u64>(), 8);
    }

    #[test]
    fn wins_roundtrips_through_probability() {
        let config = SimulationConfig::new(1000, 4.0, 3.0).with_seed(21);
        let summary = Simulator::new(config).run(&toy_estimates(), &toy_map()).unwrap();

        let implied = summary.wins(Side::A) + summary.wins(Side::B);
        assert!(implied <= summary.trials);
    }

    #[test]
    fn summary_serialization_roundtrip() {
        let config = SimulationConfig::new(200, 4.0, 3.0).with_seed(5);
        let summary = Simulator::new(config).run(&toy_estimates(), &toy_map()).unwrap();

        let json = serde_json::to_string(&summary).unwrap();
        let back: SimulationSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(back, summary);
    }
}
