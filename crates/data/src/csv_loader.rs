//! Poll CSV ingestion.
//!
//! Input is a flat poll export with one row per (poll instance, candidate).
//! End dates use the locale format `%m/%d/%y`, parsed with an explicit format
//! string. Rows that cannot be interpreted (unparseable date, out-of-range
//! percentage or grade, missing field) are excluded and counted; a malformed
//! record never becomes a zero-weighted or guessed-value record.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use electcast_core::{ForecastError, PollRecord};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Explicit date format of the poll export's end-date column.
pub const POLL_DATE_FORMAT: &str = "%m/%d/%y";

/// Counters from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows read from the file.
    pub rows_read: usize,
    /// Rows excluded as malformed.
    pub rows_excluded: usize,
}

/// One raw CSV row. Extra columns in the export are ignored.
#[derive(Debug, Deserialize)]
struct RawPollRow {
    state: String,
    end_date: String,
    candidate_name: String,
    pct: Option<f64>,
    numeric_grade: Option<f64>,
    question_id: Option<String>,
}

/// Loads poll records from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Malformed rows are
/// not errors at this level: they are excluded, logged, and counted in the
/// report.
pub fn load_poll_records(path: &Path) -> Result<(Vec<PollRecord>, IngestReport)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open poll CSV: {}", path.display()))?;

    let mut records = Vec::new();
    let mut report = IngestReport::default();
    for row in reader.deserialize::<RawPollRow>() {
        report.rows_read += 1;
        let parsed = row
            .map_err(|e| ForecastError::MalformedInput(e.to_string()))
            .and_then(parse_row);
        match parsed {
            Ok(record) => records.push(record),
            Err(err) => {
                report.rows_excluded += 1;
                warn!(row = report.rows_read, %err, "excluding malformed poll row");
            }
        }
    }

    info!(
        path = %path.display(),
        kept = records.len(),
        excluded = report.rows_excluded,
        "loaded poll records"
    );
    Ok((records, report))
}

fn parse_row(row: RawPollRow) -> Result<PollRecord, ForecastError> {
    if row.state.is_empty() {
        return Err(ForecastError::MalformedInput("missing region".to_string()));
    }
    if row.candidate_name.is_empty() {
        return Err(ForecastError::MalformedInput(
            "missing candidate name".to_string(),
        ));
    }

    let observation_date = NaiveDate::parse_from_str(&row.end_date, POLL_DATE_FORMAT)
        .map_err(|_| {
            ForecastError::MalformedInput(format!("unparseable end date {:?}", row.end_date))
        })?;

    let support_pct = row
        .pct
        .ok_or_else(|| ForecastError::MalformedInput("missing support percentage".to_string()))?;
    if !(0.0..=100.0).contains(&support_pct) {
        return Err(ForecastError::MalformedInput(format!(
            "support {support_pct} outside [0, 100]"
        )));
    }

    let source_quality = row
        .numeric_grade
        .ok_or_else(|| ForecastError::MalformedInput("missing pollster grade".to_string()))?;
    if !(0.0..=3.0).contains(&source_quality) {
        return Err(ForecastError::MalformedInput(format!(
            "grade {source_quality} outside [0, 3]"
        )));
    }

    let sample_group_id = row
        .question_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ForecastError::MalformedInput("missing question id".to_string()))?;

    Ok(PollRecord::new(
        row.state,
        observation_date,
        row.candidate_name,
        support_pct,
        source_quality,
        sample_group_id,
    ))
}
