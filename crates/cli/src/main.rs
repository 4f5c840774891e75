use clap::{Parser, Subcommand};

mod commands;
mod pipeline;
mod presets;
mod render;

use commands::{EstimatesArgs, ForecastArgs, HistoryArgs};

#[derive(Parser)]
#[command(name = "electcast")]
#[command(about = "Two-candidate electoral forecast from opinion polls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate polls and simulate the electoral outcome
    Forecast(ForecastArgs),
    /// Show per-region estimates without simulating
    Estimates(EstimatesArgs),
    /// Show recorded forecast runs
    History(HistoryArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Forecast(args) => commands::run_forecast(args),
        Commands::Estimates(args) => commands::run_estimates(args),
        Commands::History(args) => commands::run_history(args),
    }
}
