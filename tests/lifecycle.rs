//! End-to-end runs of the lifecycle against a recording matrix.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use review_heatmap::config::Rgb;
use review_heatmap::display::{CallLog, MatrixCall, RecordingMatrix};
use review_heatmap::error::{DisplayError, HistoryError};
use review_heatmap::heatmap::GridGeometry;
use review_heatmap::history::{AnkiResponse, HistorySource, ReviewLog};
use review_heatmap::lifecycle::{Lifecycle, Outcome, Stage};
use review_heatmap::HeatmapConfig;

struct StubLog(Option<Value>);

#[async_trait]
impl ReviewLog for StubLog {
    async fn reviews_by_day(&self) -> Result<AnkiResponse, HistoryError> {
        match &self.0 {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Err(HistoryError::MissingResult),
        }
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn lifecycle(reply: Option<Value>) -> Lifecycle {
    let history = HistorySource::new(Arc::new(StubLog(reply))).with_today(today());
    Lifecycle::new(HeatmapConfig::dimmed(), history)
}

/// Four reviews the day before `today()`, eight on `today()`.
fn recent_reviews() -> Value {
    json!({
        "result": [["2024-03-09", 4], ["2024-03-10", 8]],
        "error": null
    })
}

async fn wait_for_shows(log: &CallLog, shows: usize) {
    for _ in 0..200 {
        if log.shows() >= shows {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("display never committed {} frame(s)", shows);
}

#[tokio::test]
async fn test_frame_then_blank_on_termination() {
    let (matrix, log) = RecordingMatrix::new(GridGeometry::UNICORN_HAT_MINI);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut lifecycle = lifecycle(Some(recent_reviews()));

    let run = tokio::spawn(async move {
        let outcome = lifecycle
            .run(move || Ok(matrix), async {
                let _ = stop_rx.await;
            })
            .await;
        (outcome, lifecycle.stage())
    });

    wait_for_shows(&log, 1).await;
    let frame = log.calls();
    assert_eq!(frame.len(), 1 + 1 + 119 + 1);
    assert_eq!(frame[0], MatrixCall::SetBrightness(0.1));
    assert_eq!(frame[1], MatrixCall::Clear);
    assert_eq!(frame.last(), Some(&MatrixCall::Show));
    assert_eq!(log.pixel_writes(), 119);

    // Newest day sits bottom-right, the day before just above it.
    assert!(frame.contains(&MatrixCall::SetPixel {
        column: 16,
        row: 6,
        color: Rgb::new(0, 64, 0)
    }));
    assert!(frame.contains(&MatrixCall::SetPixel {
        column: 16,
        row: 5,
        color: Rgb::new(0, 200, 0)
    }));

    // Nothing else happens while waiting.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(log.len(), frame.len());

    stop_tx.send(()).unwrap();
    let (outcome, stage) = run.await.unwrap();

    assert_eq!(outcome, Outcome::Terminated);
    assert_eq!(stage, Stage::Terminated);

    let calls = log.calls();
    assert_eq!(&calls[frame.len()..], &[MatrixCall::Clear, MatrixCall::Show]);
    assert_eq!(log.pixel_writes(), 119);
}

#[tokio::test]
async fn test_unavailable_history_shows_blank_heatmap() {
    let (matrix, log) = RecordingMatrix::new(GridGeometry::UNICORN_HAT_MINI);
    let mut lifecycle = lifecycle(None);

    let outcome = lifecycle.run(move || Ok(matrix), async {}).await;

    assert_eq!(outcome, Outcome::Terminated);
    assert_eq!(log.pixel_writes(), 119);
    assert!(log.calls().iter().all(|call| match call {
        MatrixCall::SetPixel { color, .. } => *color == Rgb::BLACK,
        _ => true,
    }));
    assert_eq!(log.shows(), 2);
}

#[tokio::test]
async fn test_open_failure_is_fatal() {
    let (_unused, log) = RecordingMatrix::new(GridGeometry::UNICORN_HAT_MINI);
    let mut lifecycle = lifecycle(Some(recent_reviews()));

    let outcome = lifecycle
        .run(
            || -> Result<RecordingMatrix, DisplayError> {
                Err(DisplayError::Init("no matrix attached".to_string()))
            },
            async { panic!("termination wait must not start after a failed render"); },
        )
        .await;

    assert_eq!(outcome, Outcome::Failed);
    assert_ne!(outcome.exit_status(), 0);
    assert_eq!(lifecycle.stage(), Stage::Failed);
    assert_eq!(log.pixel_writes(), 0);
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_initial_commit_failure_skips_shutdown() {
    let (matrix, log) = RecordingMatrix::new(GridGeometry::UNICORN_HAT_MINI);
    let matrix = matrix.failing_shows_from(0);
    let mut lifecycle = lifecycle(Some(recent_reviews()));

    let outcome = lifecycle
        .run(move || Ok(matrix), std::future::pending::<()>())
        .await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(log.shows(), 1);
    assert_eq!(log.calls().last(), Some(&MatrixCall::Show));
}

#[tokio::test]
async fn test_shutdown_commit_failure_still_terminates() {
    let (matrix, log) = RecordingMatrix::new(GridGeometry::UNICORN_HAT_MINI);
    let matrix = matrix.failing_shows_from(1);
    let mut lifecycle = lifecycle(Some(recent_reviews()));

    let outcome = lifecycle.run(move || Ok(matrix), async {}).await;

    assert_eq!(outcome, Outcome::Terminated);
    assert_eq!(outcome.exit_status(), 0);
    assert_eq!(log.shows(), 2);
}

#[tokio::test]
async fn test_window_larger_than_grid_is_truncated() {
    let (matrix, log) = RecordingMatrix::new(GridGeometry { columns: 2, rows: 7 });
    let mut lifecycle = lifecycle(Some(recent_reviews()));

    let outcome = lifecycle.run(move || Ok(matrix), async {}).await;

    assert_eq!(outcome, Outcome::Terminated);
    assert_eq!(log.pixel_writes(), 14);
}
