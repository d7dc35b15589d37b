//! Review History
//!
//! Pulls the per-day review counts from AnkiConnect and aligns them to a
//! trailing window of calendar days ending today.

mod client;
mod source;

pub use client::{AnkiConnectClient, AnkiResponse, ReviewLog, REVIEWS_BY_DAY_ACTION};
pub use source::{build_series, parse_review_pairs, HistorySource};

/// Review counts per day, oldest first. Missing days are stored as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountSeries(Vec<u64>);

impl CountSeries {
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest count in the window, or 0 for an empty window.
    pub fn peak(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0, |acc, &c| acc.saturating_add(c))
    }

    pub fn active_days(&self) -> usize {
        self.0.iter().filter(|&&c| c > 0).count()
    }
}

impl From<Vec<u64>> for CountSeries {
    fn from(counts: Vec<u64>) -> Self {
        Self(counts)
    }
}

/// Whether the series came from the service or is the all-zero fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Fresh,
    Degraded,
}

/// Result of a history fetch. Always carries a full-length series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedHistory {
    pub counts: CountSeries,
    pub status: FetchStatus,
}

impl FetchedHistory {
    pub fn degraded(window_days: usize) -> Self {
        Self {
            counts: CountSeries::zeros(window_days),
            status: FetchStatus::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == FetchStatus::Degraded
    }
}
