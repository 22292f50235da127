//! Recording backend for GPU-less tests.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::coords::Viewport;
use crate::error::{Error, Result};

use super::{FrameOutcome, FrameParams, PointBackend};

#[derive(Debug, Default)]
pub(crate) struct RecordLog {
    pub size: Viewport,
    pub positions: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
    pub position_uploads: usize,
    pub color_uploads: usize,
    pub frames: Vec<FrameParams>,
    pub resizes: Vec<(u32, u32)>,
    /// Returned (once) by the next `draw_frame`.
    pub fail_next_draw: Option<Error>,
    pub skip_next_draw: bool,
    /// Time each `draw_frame` takes, spent outside the log lock.
    pub draw_delay: Duration,
}

/// Backend that records every call into a shared log.
#[derive(Debug, Clone)]
pub(crate) struct RecordingBackend {
    log: Arc<Mutex<RecordLog>>,
}

impl RecordingBackend {
    pub fn new(width: f64, height: f64) -> Self {
        let log = RecordLog {
            size: Viewport::new(width, height),
            ..RecordLog::default()
        };
        Self { log: Arc::new(Mutex::new(log)) }
    }

    pub fn log(&self) -> MutexGuard<'_, RecordLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PointBackend for RecordingBackend {
    fn canvas_size(&self) -> Viewport {
        self.log().size
    }

    fn resize(&mut self, width: u32, height: u32) {
        let mut log = self.log();
        log.size = Viewport::new(width as f64, height as f64);
        log.resizes.push((width, height));
    }

    fn upload_positions(&mut self, positions: &[[f32; 2]]) -> Result<()> {
        let mut log = self.log();
        log.positions = positions.to_vec();
        log.position_uploads += 1;
        Ok(())
    }

    fn upload_colors(&mut self, colors: &[[f32; 3]]) -> Result<()> {
        let mut log = self.log();
        log.colors = colors.to_vec();
        log.color_uploads += 1;
        Ok(())
    }

    fn draw_frame(&mut self, frame: &FrameParams) -> Result<FrameOutcome> {
        let delay = self.log().draw_delay;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let mut log = self.log();
        if let Some(err) = log.fail_next_draw.take() {
            return Err(err);
        }
        if std::mem::take(&mut log.skip_next_draw) {
            return Ok(FrameOutcome::Skipped);
        }
        log.frames.push(*frame);
        Ok(FrameOutcome::Presented)
    }
}
