//! Estimates CLI command.
//!
//! Aggregates polls and applies the assumption overlay, then prints the
//! per-region table without simulating. Useful for eyeballing the aggregation
//! before committing to a run, or for comparing grouping modes.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use electcast_core::ConfigLoader;
use std::path::Path;

use crate::pipeline;
use crate::presets;
use crate::render::EstimateTableFormatter;

/// Arguments for the estimates command.
#[derive(Args, Debug, Clone)]
pub struct EstimatesArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Electcast.toml")]
    pub config: String,

    /// Poll CSV path (overrides the configured path)
    #[arg(long)]
    pub polls: Option<String>,

    /// Reference date for poll aging, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Aggregation mode: per-poll-instance or per-candidate
    #[arg(long)]
    pub mode: Option<String>,
}

/// Runs the estimates command.
///
/// # Errors
/// Returns an error if the config or poll CSV cannot be read, or the mode
/// string is unknown.
pub fn run_estimates(args: EstimatesArgs) -> Result<()> {
    let mut config = ConfigLoader::load_from(&args.config)?;
    if let Some(mode) = args.mode {
        config.aggregation.mode = mode;
    }
    let reference_date = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let polls_path = args.polls.unwrap_or_else(|| config.paths.polls_csv.clone());

    let map = pipeline::electoral_map(&config)?;
    let estimates = pipeline::build_estimates(&config, Path::new(&polls_path), reference_date)
        .with_context(|| format!("failed to build estimates from {polls_path}"))?;

    let pair = pipeline::candidate_pair(&config);
    let codes = presets::region_codes();
    println!(
        "{}",
        EstimateTableFormatter::format(&estimates, &map, &codes, &pair)
    );
    println!(
        "{} regions estimated ({} mode)",
        estimates.len(),
        config.aggregation.mode
    );

    Ok(())
}
