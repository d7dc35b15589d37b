//! In-memory matrix that records every call, for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use super::PixelMatrix;
use crate::config::Rgb;
use crate::error::DisplayError;
use crate::heatmap::GridGeometry;

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCall {
    SetBrightness(f32),
    Clear,
    SetPixel { column: usize, row: usize, color: Rgb },
    Show,
}

/// Shared view of the calls a [`RecordingMatrix`] received.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<MatrixCall>>>);

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, Vec<MatrixCall>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: MatrixCall) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<MatrixCall> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn shows(&self) -> usize {
        self.lock().iter().filter(|c| **c == MatrixCall::Show).count()
    }

    pub fn pixel_writes(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, MatrixCall::SetPixel { .. }))
            .count()
    }
}

pub struct RecordingMatrix {
    geometry: GridGeometry,
    log: CallLog,
    fail_shows_from: Option<usize>,
    shows: usize,
}

impl RecordingMatrix {
    pub fn new(geometry: GridGeometry) -> (Self, CallLog) {
        let log = CallLog::default();
        let matrix = Self {
            geometry,
            log: log.clone(),
            fail_shows_from: None,
            shows: 0,
        };
        (matrix, log)
    }

    /// Every `show` from the `n`th (zero-based) on returns an I/O error.
    pub fn failing_shows_from(mut self, n: usize) -> Self {
        self.fail_shows_from = Some(n);
        self
    }
}

impl PixelMatrix for RecordingMatrix {
    fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.log.push(MatrixCall::SetBrightness(brightness));
    }

    fn clear(&mut self) {
        self.log.push(MatrixCall::Clear);
    }

    fn set_pixel(&mut self, column: usize, row: usize, color: Rgb) {
        self.log.push(MatrixCall::SetPixel { column, row, color });
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.log.push(MatrixCall::Show);
        let ordinal = self.shows;
        self.shows += 1;
        match self.fail_shows_from {
            Some(n) if ordinal >= n => Err(DisplayError::Io(format!("show #{} rejected", ordinal))),
            _ => Ok(()),
        }
    }
}
