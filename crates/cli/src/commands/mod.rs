//! CLI commands for the forecasting pipeline.

pub mod estimates;
pub mod forecast;
pub mod history;

pub use estimates::{run_estimates, EstimatesArgs};
pub use forecast::{run_forecast, ForecastArgs};
pub use history::{run_history, HistoryArgs};
