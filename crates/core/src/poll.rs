//! Raw poll observations and the two-candidate contest they describe.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One side of the two-candidate contest.
///
/// Differentials across the whole pipeline are signed so that positive values
/// favor side A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The first candidate of the tracked pair.
    A,
    /// The second candidate of the tracked pair.
    B,
}

impl Side {
    /// Resolves a signed differential to a winning side.
    ///
    /// Candidate A takes strictly positive differentials; an exact zero goes
    /// to candidate B. The asymmetry is preserved from the reference behavior
    /// and pinned by tests in the aggregator and the simulator.
    #[must_use]
    pub fn from_differential(differential: f64) -> Self {
        if differential > 0.0 {
            Self::A
        } else {
            Self::B
        }
    }

    /// Returns the other side.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// The ordered candidate pair a forecast tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePair {
    a: String,
    b: String,
}

impl CandidatePair {
    /// Creates a pair. `a` is the candidate favored by positive differentials.
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Candidate name for a side.
    #[must_use]
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Maps a candidate name back to its side. `None` for candidates outside
    /// the pair; the aggregator discards those records.
    #[must_use]
    pub fn side_of(&self, candidate: &str) -> Option<Side> {
        if candidate == self.a {
            Some(Side::A)
        } else if candidate == self.b {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// A single raw poll observation. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollRecord {
    /// Contest unit the observation belongs to (state or district).
    pub region: String,
    /// End date of the poll's field period.
    pub observation_date: NaiveDate,
    /// Candidate the support figure refers to.
    pub candidate: String,
    /// Reported support, percent of respondents (0 to 100).
    pub support_pct: f64,
    /// Pollster quality grade (0 to 3, higher is better).
    pub source_quality: f64,
    /// Opaque identifier grouping rows that came from the same poll instance.
    pub sample_group_id: String,
}

impl PollRecord {
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        observation_date: NaiveDate,
        candidate: impl Into<String>,
        support_pct: f64,
        source_quality: f64,
        sample_group_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            observation_date,
            candidate: candidate.into(),
            support_pct,
            source_quality,
            sample_group_id: sample_group_id.into(),
        }
    }
}
