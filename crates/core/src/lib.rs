pub mod config;
pub mod config_loader;
pub mod error;
pub mod poll;
pub mod region;
pub mod validation;

pub use config::{
    AggregationConfig, AppConfig, CandidatesConfig, ElectoralConfig, PathsConfig,
    SimulationSettings, SupportPair, WeightingConfig,
};
pub use config_loader::ConfigLoader;
pub use error::ForecastError;
pub use poll::{CandidatePair, PollRecord, Side};
pub use region::{ElectoralMap, EstimateSet, RegionEstimate};
pub use validation::{validate_coverage, wilson_ci};
