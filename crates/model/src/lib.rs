pub mod aggregate;
pub mod overlay;
pub mod weight;

pub use aggregate::{AggregationMode, Aggregator};
pub use overlay::AssumptionOverlay;
pub use weight::poll_weight;
