//! Review Heatmap
//!
//! Fetches the review history once, paints it, and keeps it on screen until
//! interrupted. Exit status is non-zero only when the display could not be
//! brought up.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use review_heatmap::display::TerminalMatrix;
use review_heatmap::history::AnkiConnectClient;
use review_heatmap::lifecycle::termination_requested;
use review_heatmap::utils::init_logging;
use review_heatmap::{HeatmapConfig, HistorySource, Lifecycle};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging()?;

    let config = HeatmapConfig::from_env().context("Invalid heatmap configuration")?;
    info!(
        "🚀 Review heatmap: {} days from {} at brightness {}",
        config.window_days,
        config.anki_url(),
        config.brightness
    );

    let client = AnkiConnectClient::new(config.anki_url(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    let history = HistorySource::new(Arc::new(client))
        .with_strict_api_errors(config.strict_api_errors);

    let mut lifecycle = Lifecycle::new(config, history);
    let outcome = lifecycle
        .run(TerminalMatrix::open, termination_requested())
        .await;

    Ok(ExitCode::from(outcome.exit_status()))
}
