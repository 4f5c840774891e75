pub mod csv_loader;
pub mod result_log;

pub use csv_loader::{load_poll_records, IngestReport, POLL_DATE_FORMAT};
pub use result_log::{LogError, ResultLog, RunRecord};
