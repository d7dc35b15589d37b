//! Heatmap shaping: counts to levels, levels to coloured grid cells.

mod grid;
mod levels;

pub use grid::{GridCoordinate, GridGeometry, GridMapper, PixelWrite};
pub use levels::{normalize, LevelSeries};
