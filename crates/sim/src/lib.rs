pub mod allocate;
pub mod monte_carlo;

pub use allocate::{allocate_votes, ElectoralTally};
pub use monte_carlo::{SimulationConfig, SimulationSummary, Simulator};
