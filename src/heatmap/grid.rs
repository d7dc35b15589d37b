//! Grid Mapping
//!
//! Lays the series out column by column: seven consecutive days fill one
//! column top to bottom, so each column is a week. Days that would land past
//! the last column are dropped.

use crate::config::{ColorTable, Rgb};
use super::LevelSeries;

/// Physical size of a pixel matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    /// 17 x 7 RGB matrix of the Unicorn HAT Mini.
    pub const UNICORN_HAT_MINI: GridGeometry = GridGeometry { columns: 17, rows: 7 };

    pub const fn capacity(&self) -> usize {
        self.columns * self.rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub column: usize,
    pub row: usize,
}

/// One resolved pixel, ready for the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    pub at: GridCoordinate,
    pub color: Rgb,
}

/// Stateless mapper from a [`LevelSeries`] to pixel writes.
#[derive(Debug, Clone, Copy)]
pub struct GridMapper {
    geometry: GridGeometry,
    colors: ColorTable,
}

impl GridMapper {
    pub fn new(geometry: GridGeometry, colors: ColorTable) -> Self {
        Self { geometry, colors }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Cell for series `index`, or `None` when it falls outside the grid.
    pub fn coordinate(&self, index: usize) -> Option<GridCoordinate> {
        let rows = self.geometry.rows;
        if rows == 0 {
            return None;
        }
        let column = index / rows;
        if column >= self.geometry.columns {
            return None;
        }
        Some(GridCoordinate {
            column,
            row: index % rows,
        })
    }

    pub fn render(&self, levels: &LevelSeries) -> Vec<PixelWrite> {
        levels
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(|(i, &level)| {
                self.coordinate(i).map(|at| PixelWrite {
                    at,
                    color: self.colors.color(level),
                })
            })
            .collect()
    }
}
