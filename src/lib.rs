//! Review Heatmap
//!
//! Shows the last few months of Anki review activity on a small RGB pixel
//! matrix, one pixel per day, greener for busier days:
//! - Review history fetched from AnkiConnect, degraded to zeros on failure
//! - Counts bucketed into six intensity levels
//! - Column-per-week layout on a 17x7 grid
//! - Display blanked on SIGINT / SIGTERM

pub mod config;
pub mod display;
pub mod error;
pub mod heatmap;
pub mod history;
pub mod lifecycle;
pub mod utils;

// Re-exports for convenience
pub use config::{ColorTable, HeatmapConfig, Rgb};
pub use display::{DisplaySession, PixelMatrix};
pub use history::HistorySource;
pub use lifecycle::{Lifecycle, Outcome};
