//! Level Normalisation
//!
//! Buckets each day's count into `0..=5` relative to the busiest day in the
//! window. Zero stays zero; any activity shows up as at least level 1.

use crate::config::MAX_LEVEL;
use crate::history::CountSeries;

/// Intensity level per day, index-aligned with the [`CountSeries`] it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelSeries(Vec<u8>);

impl LevelSeries {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for LevelSeries {
    fn from(levels: Vec<u8>) -> Self {
        Self(levels)
    }
}

/// `floor(5 * c / max)`, clamped to `1..=5` for non-zero counts.
pub fn normalize(counts: &CountSeries) -> LevelSeries {
    let max_count = counts.peak().max(1);
    let top = u64::from(MAX_LEVEL);

    counts
        .as_slice()
        .iter()
        .map(|&count| {
            if count == 0 {
                0
            } else {
                // u128 keeps 5 * count from overflowing on absurd inputs.
                let level = u128::from(top) * u128::from(count) / u128::from(max_count);
                level.clamp(1, u128::from(top)) as u8
            }
        })
        .collect::<Vec<_>>()
        .into()
}
