//! Logging
//!
//! Plain `tracing` subscriber with an `EnvFilter`. `RUST_LOG` overrides the
//! default of `review_heatmap=info`. Output goes to stderr, stdout belongs to
//! the terminal matrix.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("review_heatmap=info"));

    Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to set tracing subscriber: {}", e))
}
