//! Terminal preview matrix
//!
//! Draws the frame as 24-bit coloured blocks, two characters per pixel so
//! cells come out roughly square. When it owns stdout the matrix lives on the
//! alternate screen. Every row is drawn at an absolute position, so output
//! printed between frames cannot shift a redraw.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::tty::IsTty;
use crossterm::{execute, queue};

use super::PixelMatrix;
use crate::config::Rgb;
use crate::error::DisplayError;
use crate::heatmap::GridGeometry;

const CELL: &str = "██";

/// Only one terminal matrix may own stdout at a time.
static STDOUT_CLAIMED: AtomicBool = AtomicBool::new(false);

pub struct TerminalMatrix<W: Write + Send = Stdout> {
    out: W,
    geometry: GridGeometry,
    cells: Vec<Rgb>,
    brightness: f32,
    owns_stdout: bool,
}

impl TerminalMatrix<Stdout> {
    /// Claim stdout as a 17x7 matrix.
    pub fn open() -> Result<Self, DisplayError> {
        let out = io::stdout();
        if !out.is_tty() {
            return Err(DisplayError::Init("stdout is not a terminal".to_string()));
        }
        if STDOUT_CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DisplayError::Busy);
        }

        let mut matrix = Self::with_writer(out, GridGeometry::UNICORN_HAT_MINI);
        matrix.owns_stdout = true;
        if let Err(e) = execute!(matrix.out, EnterAlternateScreen, Hide) {
            return Err(DisplayError::Init(e.to_string()));
        }
        Ok(matrix)
    }
}

impl<W: Write + Send> TerminalMatrix<W> {
    /// Render into any writer. Does not claim stdout.
    pub fn with_writer(out: W, geometry: GridGeometry) -> Self {
        Self {
            out,
            geometry,
            cells: vec![Rgb::BLACK; geometry.capacity()],
            brightness: 1.0,
            owns_stdout: false,
        }
    }

    pub fn into_inner(self) -> W
    where
        W: Default,
    {
        let mut this = self;
        std::mem::take(&mut this.out)
    }

    fn scaled(&self, color: Rgb) -> Color {
        let scale = |c: u8| (f32::from(c) * self.brightness).round() as u8;
        Color::Rgb {
            r: scale(color.r),
            g: scale(color.g),
            b: scale(color.b),
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let GridGeometry { columns, rows } = self.geometry;
        for row in 0..rows {
            queue!(self.out, MoveTo(0, row as u16))?;
            for column in 0..columns {
                let color = self.scaled(self.cells[column * rows + row]);
                queue!(self.out, SetForegroundColor(color), Print(CELL))?;
            }
            queue!(self.out, ResetColor)?;
        }
        // Park the cursor under the frame.
        queue!(self.out, MoveTo(0, rows as u16))?;
        self.out.flush()
    }
}

impl<W: Write + Send> PixelMatrix for TerminalMatrix<W> {
    fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    fn clear(&mut self) {
        self.cells.fill(Rgb::BLACK);
    }

    fn set_pixel(&mut self, column: usize, row: usize, color: Rgb) {
        let GridGeometry { columns, rows } = self.geometry;
        if column < columns && row < rows {
            self.cells[column * rows + row] = color;
        }
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.draw().map_err(DisplayError::from)
    }
}

impl<W: Write + Send> Drop for TerminalMatrix<W> {
    fn drop(&mut self) {
        if self.owns_stdout {
            let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
            STDOUT_CLAIMED.store(false, Ordering::Release);
        }
    }
}
