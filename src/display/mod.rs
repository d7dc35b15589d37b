//! Display Module
//!
//! A [`PixelMatrix`] is the narrow contract the heatmap needs from a physical
//! (or simulated) RGB matrix. Writes are buffered until [`PixelMatrix::show`].

mod recording;
mod session;
mod terminal;

pub use recording::{CallLog, MatrixCall, RecordingMatrix};
pub use session::DisplaySession;
pub use terminal::TerminalMatrix;

use crate::config::Rgb;
use crate::error::DisplayError;
use crate::heatmap::GridGeometry;

/// Buffered RGB pixel matrix.
pub trait PixelMatrix: Send {
    /// Columns and rows the matrix physically has.
    fn geometry(&self) -> GridGeometry;

    /// Global brightness in `[0, 1]`.
    fn set_brightness(&mut self, brightness: f32);

    /// Blank the buffered frame. Not visible until `show`.
    fn clear(&mut self);

    fn set_pixel(&mut self, column: usize, row: usize, color: Rgb);

    /// Push the buffered frame to the visible surface.
    fn show(&mut self) -> Result<(), DisplayError>;
}
