//! History CLI command.
//!
//! Prints previous forecast runs from the append-only result log.

use anyhow::Result;
use clap::Args;
use electcast_core::ConfigLoader;
use electcast_data::ResultLog;

use crate::render::HistoryFormatter;

/// Arguments for the history command.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Electcast.toml")]
    pub config: String,

    /// Show at most this many recent runs
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Runs the history command.
///
/// # Errors
/// Returns an error if the config cannot be read or the result log is
/// corrupt.
pub fn run_history(args: HistoryArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let log = ResultLog::new(&config.paths.result_log);

    let records = log.read_all()?;
    if records.is_empty() {
        println!("No recorded forecast runs at {}", log.path().display());
        return Ok(());
    }

    let start = records.len().saturating_sub(args.limit);
    println!("{}", HistoryFormatter::format(&records[start..]));

    Ok(())
}
