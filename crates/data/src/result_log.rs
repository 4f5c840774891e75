//! Append-only forecast run log.
//!
//! One JSON line per run. A missing log is created on first append; an
//! existing log that fails validation is a fatal error. It is never
//! truncated or overwritten, so the corruption stays visible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from result-log operations.
#[derive(Error, Debug)]
pub enum LogError {
    /// IO error reading or writing the log file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while writing a record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The log exists but cannot be read back. Appending would bury the
    /// corruption, so both reads and appends refuse.
    #[error("result log {path} is corrupt at line {line}: {reason}")]
    Corrupt {
        path: String,
        line: usize,
        reason: String,
    },
}

/// One forecast run, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Candidate favored by positive differentials.
    pub candidate_a: String,
    /// The opposing candidate.
    pub candidate_b: String,
    pub win_probability_a: f64,
    pub win_probability_b: f64,
    pub tie_probability: f64,
    pub mean_votes_a: f64,
    pub mean_votes_b: f64,
    /// Trial count behind the probabilities.
    pub trials: u64,
}

/// Append-only JSONL log of forecast runs.
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one run record, creating the log if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Corrupt`] if the existing log fails validation,
    /// or an IO/JSON error from the write itself.
    pub fn append(&self, record: &RunRecord) -> Result<(), LogError> {
        if self.path.exists() {
            // Refuse to extend a log that can no longer be read back.
            self.read_all()?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        debug!(path = %self.path.display(), "appended forecast run");
        Ok(())
    }

    /// Reads every run in the log. A missing log reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Corrupt`] naming the first unreadable line.
    pub fn read_all(&self) -> Result<Vec<RunRecord>, LogError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|e| LogError::Corrupt {
                path: self.path.display().to_string(),
                line: index + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(trials: u64) -> RunRecord {
        RunRecord {
            timestamp: Utc::now(),
            candidate_a: "Alpha".to_string(),
            candidate_b: "Beta".to_string(),
            win_probability_a: 0.62,
            win_probability_b: 0.37,
            tie_probability: 0.01,
            mean_votes_a: 281.4,
            mean_votes_b: 256.6,
            trials,
        }
    }

    #[test]
    fn missing_log_is_created_on_first_append() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("runs.jsonl"));

        log.append(&sample_record(1000)).unwrap();

        assert!(log.path().exists());
        assert_eq!(log.read_all().unwrap().len(), 1);
    }

    #[test]
    fn appends_accumulate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("runs.jsonl"));

        log.append(&sample_record(1000)).unwrap();
        log.append(&sample_record(2000)).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trials, 1000);
        assert_eq!(records[1].trials, 2000);
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("never-written.jsonl"));

        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_log_refuses_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        std::fs::write(&path, "not json at all\n").unwrap();
        let log = ResultLog::new(&path);

        let err = log.append(&sample_record(1000)).unwrap_err();

        match err {
            LogError::Corrupt { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Corrupt, got {other:?}"),
        }
        // The corrupt content must be left untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all\n");
    }

    #[test]
    fn corrupt_line_is_reported_with_its_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let log = ResultLog::new(&path);
        log.append(&sample_record(1000)).unwrap();
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{truncated\n");
        std::fs::write(&path, content).unwrap();

        let err = log.read_all().unwrap_err();

        match err {
            LogError::Corrupt { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = sample_record(5000);
        let json = serde_json::to_string(&record).unwrap();
        let back: RunRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
    }
}
