//! Window alignment and the degrade-to-zeros fetch path.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

use super::client::{AnkiResponse, ReviewLog};
use super::{CountSeries, FetchStatus, FetchedHistory};
use crate::error::HistoryError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fetches review history and never fails: any error becomes a window of zeros.
pub struct HistorySource {
    log: Arc<dyn ReviewLog>,
    strict_api_errors: bool,
    today: Option<NaiveDate>,
}

impl HistorySource {
    pub fn new(log: Arc<dyn ReviewLog>) -> Self {
        Self {
            log,
            strict_api_errors: true,
            today: None,
        }
    }

    /// When disabled, a populated `error` field is logged and the rows are used anyway.
    pub fn with_strict_api_errors(mut self, strict: bool) -> Self {
        self.strict_api_errors = strict;
        self
    }

    /// Pin the window end to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Counts for the `window_days` days ending today (local clock, unless pinned).
    pub async fn fetch(&self, window_days: usize) -> FetchedHistory {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        self.fetch_ending(window_days, today).await
    }

    /// Counts for the `window_days` days ending on `today`, inclusive.
    pub async fn fetch_ending(&self, window_days: usize, today: NaiveDate) -> FetchedHistory {
        match self.lookup().await {
            Ok(reviews) => {
                let counts = build_series(&reviews, today, window_days);
                debug!(
                    "Review window ending {}: {} active days, {} reviews, peak {}",
                    today,
                    counts.active_days(),
                    counts.total(),
                    counts.peak()
                );
                FetchedHistory {
                    counts,
                    status: FetchStatus::Fresh,
                }
            }
            Err(e) => {
                warn!("Failed to fetch review data: {}", e);
                FetchedHistory::degraded(window_days)
            }
        }
    }

    async fn lookup(&self) -> Result<HashMap<NaiveDate, u64>, HistoryError> {
        let response = self.log.reviews_by_day().await?;
        self.check_error_field(&response)?;
        let rows = response.result.ok_or(HistoryError::MissingResult)?;
        Ok(parse_review_pairs(&rows))
    }

    fn check_error_field(&self, response: &AnkiResponse) -> Result<(), HistoryError> {
        let Some(error) = &response.error else {
            return Ok(());
        };
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if self.strict_api_errors {
            Err(HistoryError::Api(message))
        } else {
            warn!("Review service reported an error, using result anyway: {}", message);
            Ok(())
        }
    }
}

/// Builds the date lookup from `[date, count]` rows, skipping any row of the wrong shape.
pub fn parse_review_pairs(rows: &[Value]) -> HashMap<NaiveDate, u64> {
    let mut reviews = HashMap::new();
    for row in rows {
        match parse_row(row) {
            Some((date, count)) => {
                reviews.insert(date, count);
            }
            None => debug!("Skipping malformed review row: {}", row),
        }
    }
    reviews
}

fn parse_row(row: &Value) -> Option<(NaiveDate, u64)> {
    let [date, count] = row.as_array()?.as_slice() else {
        return None;
    };
    let date = NaiveDate::parse_from_str(date.as_str()?, DATE_FORMAT).ok()?;
    let count = match count.as_u64() {
        Some(n) => n,
        None => {
            let f = count.as_f64()?;
            if !f.is_finite() || f < 0.0 {
                return None;
            }
            f.trunc() as u64
        }
    };
    Some((date, count))
}

/// Series for `[today - (window_days - 1), today]`, oldest first.
pub fn build_series(
    reviews: &HashMap<NaiveDate, u64>,
    today: NaiveDate,
    window_days: usize,
) -> CountSeries {
    (0..window_days as u64)
        .rev()
        .map(|offset| {
            today
                .checked_sub_days(Days::new(offset))
                .and_then(|date| reviews.get(&date).copied())
                .unwrap_or(0)
        })
        .collect::<Vec<_>>()
        .into()
}
