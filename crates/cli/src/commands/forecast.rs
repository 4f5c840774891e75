//! Forecast CLI command.
//!
//! Runs the whole pipeline: ingest polls, aggregate per region, apply the
//! assumption overlay, validate coverage, simulate, render, and append the
//! run to the result log.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use electcast_core::{ConfigLoader, Side};
use electcast_data::{ResultLog, RunRecord};
use electcast_sim::{SimulationConfig, Simulator};
use std::path::Path;

use crate::pipeline;
use crate::presets;
use crate::render::{EstimateTableFormatter, SummaryFormatter};

/// Arguments for the forecast command.
#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Electcast.toml")]
    pub config: String,

    /// Poll CSV path (overrides the configured path)
    #[arg(long)]
    pub polls: Option<String>,

    /// Reference date for poll aging, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Trial count (overrides the configured count)
    #[arg(long)]
    pub trials: Option<u64>,

    /// Seed for a reproducible run (overrides the configured seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip appending this run to the result log
    #[arg(long)]
    pub no_log: bool,
}

/// Runs the forecast command.
///
/// # Errors
/// Returns an error for unreadable input, a vote table that fails the
/// national-total invariant, coverage gaps between estimates and the table,
/// invalid simulation parameters, or a corrupt result log.
pub fn run_forecast(args: ForecastArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let reference_date = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let polls_path = args.polls.unwrap_or_else(|| config.paths.polls_csv.clone());

    let map = pipeline::electoral_map(&config)?;
    let estimates = pipeline::build_estimates(&config, Path::new(&polls_path), reference_date)
        .with_context(|| format!("failed to build estimates from {polls_path}"))?;

    let mut settings = config.simulation.clone();
    if let Some(trials) = args.trials {
        settings.trials = trials;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    let sim_config = SimulationConfig {
        trials: settings.trials,
        national_stddev: settings.national_stddev,
        regional_stddev: settings.regional_stddev,
        seed: settings.seed,
        workers: settings.workers,
    };

    let summary = Simulator::new(sim_config).run(&estimates, &map)?;

    let pair = pipeline::candidate_pair(&config);
    let codes = presets::region_codes();
    println!(
        "{}",
        EstimateTableFormatter::format(&estimates, &map, &codes, &pair)
    );
    println!("{}", SummaryFormatter::format(&pair, &summary, &map));

    if !args.no_log {
        let log = ResultLog::new(&config.paths.result_log);
        log.append(&RunRecord {
            timestamp: Utc::now(),
            candidate_a: pair.name(Side::A).to_string(),
            candidate_b: pair.name(Side::B).to_string(),
            win_probability_a: summary.win_probability_a,
            win_probability_b: summary.win_probability_b,
            tie_probability: summary.tie_probability,
            mean_votes_a: summary.mean_votes_a,
            mean_votes_b: summary.mean_votes_b,
            trials: summary.trials,
        })?;
        tracing::info!(path = %log.path().display(), "appended run to result log");
    }

    Ok(())
}
