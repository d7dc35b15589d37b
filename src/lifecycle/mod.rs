//! Lifecycle Controller
//!
//! Runs fetch, normalise and render once, leaves the frame on screen, then
//! waits for a termination request and blanks the display on the way out.

mod signal;

pub use signal::termination_requested;

use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::config::HeatmapConfig;
use crate::display::{DisplaySession, PixelMatrix};
use crate::error::DisplayError;
use crate::heatmap::{normalize, GridMapper, LevelSeries};
use crate::history::HistorySource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Normalizing,
    Rendering,
    Displayed,
    ShuttingDown,
    Terminated,
    Failed,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Terminated | Stage::Failed)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Shut down on request after showing the heatmap.
    Terminated,
    /// The display could not be opened or the first frame was not committed.
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Terminated => 0,
            Outcome::Failed => 1,
        }
    }
}

pub struct Lifecycle {
    config: HeatmapConfig,
    history: HistorySource,
    stage: Stage,
}

impl Lifecycle {
    pub fn new(config: HeatmapConfig, history: HistorySource) -> Self {
        Self {
            config,
            history,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the pipeline to completion.
    ///
    /// `open` acquires the matrix once rendering starts. `shutdown` resolves
    /// when the process is asked to stop; it is the only suspension point
    /// after the frame is shown.
    pub async fn run<M, F, S>(&mut self, open: F, shutdown: S) -> Outcome
    where
        M: PixelMatrix,
        F: FnOnce() -> Result<M, DisplayError>,
        S: Future<Output = ()>,
    {
        self.advance(Stage::Fetching);
        let history = self.history.fetch(self.config.window_days).await;
        if history.is_degraded() {
            warn!("Showing an empty heatmap, review history unavailable");
        }

        self.advance(Stage::Normalizing);
        let levels = normalize(&history.counts);

        self.advance(Stage::Rendering);
        let session = match self.render(open, &levels) {
            Ok(session) => session,
            Err(e) => {
                error!("Error displaying heatmap: {}", e);
                self.advance(Stage::Failed);
                return Outcome::Failed;
            }
        };

        self.advance(Stage::Displayed);
        info!("Heatmap displayed. Press Ctrl+C to exit.");
        shutdown.await;

        self.advance(Stage::ShuttingDown);
        info!("Exiting and clearing display.");
        session.shutdown();

        self.advance(Stage::Terminated);
        Outcome::Terminated
    }

    fn render<M, F>(&self, open: F, levels: &LevelSeries) -> Result<DisplaySession<M>, DisplayError>
    where
        M: PixelMatrix,
        F: FnOnce() -> Result<M, DisplayError>,
    {
        let mut session = DisplaySession::open(open)?;
        let mapper = GridMapper::new(session.geometry(), self.config.colors);

        let capacity = mapper.geometry().capacity();
        if levels.len() > capacity {
            debug!(
                "Window of {} days exceeds grid capacity {}, newest days are dropped",
                levels.len(),
                capacity
            );
        }

        let pixels = mapper.render(levels);
        session.present(self.config.brightness, &pixels)?;
        Ok(session)
    }

    fn advance(&mut self, next: Stage) {
        debug!("Lifecycle {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}
