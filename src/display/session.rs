//! Display Session
//!
//! Owns the matrix for the lifetime of the process. A frame goes out as
//! brightness, clear, pixel writes and a single show. [`DisplaySession::shutdown`]
//! consumes the session, so the blanking sequence cannot run twice.

use tracing::{debug, error};

use super::PixelMatrix;
use crate::error::DisplayError;
use crate::heatmap::{GridGeometry, PixelWrite};

pub struct DisplaySession<M: PixelMatrix> {
    matrix: M,
}

impl<M: PixelMatrix> DisplaySession<M> {
    /// Acquire the matrix through `init`.
    pub fn open<F>(init: F) -> Result<Self, DisplayError>
    where
        F: FnOnce() -> Result<M, DisplayError>,
    {
        let matrix = init()?;
        let geometry = matrix.geometry();
        debug!("Display opened ({}x{})", geometry.columns, geometry.rows);
        Ok(Self { matrix })
    }

    pub fn geometry(&self) -> GridGeometry {
        self.matrix.geometry()
    }

    /// Paint one complete frame and commit it.
    pub fn present(&mut self, brightness: f32, pixels: &[PixelWrite]) -> Result<(), DisplayError> {
        self.matrix.set_brightness(brightness.clamp(0.0, 1.0));
        self.matrix.clear();
        for pixel in pixels {
            self.matrix.set_pixel(pixel.at.column, pixel.at.row, pixel.color);
        }
        self.matrix.show()?;
        debug!("Committed frame with {} pixels", pixels.len());
        Ok(())
    }

    /// Blank the display and release it. A failed commit is logged only.
    pub fn shutdown(mut self) {
        self.matrix.clear();
        if let Err(e) = self.matrix.show() {
            error!("Failed to clear display on shutdown: {}", e);
        }
    }
}
