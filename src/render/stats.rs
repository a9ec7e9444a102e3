//! Frame counter for the FPS readout.

use std::time::{Duration, Instant};

/// Counts frames and reports once per [`FrameStats::REPORT_INTERVAL`].
///
/// Time is passed in, never read, so tests can drive it.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u32,
    last_report: Option<Instant>,
}

impl FrameStats {
    /// Minimum time between reports.
    pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    /// Fresh counter; the window starts at the first recorded frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame rendered at `now`.
    ///
    /// Returns the number of frames in the window once at least one
    /// second has elapsed since the window opened, then starts a new one.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        let start = *self.last_report.get_or_insert(now);
        self.frames = self.frames.saturating_add(1);
        if now.saturating_duration_since(start) < Self::REPORT_INTERVAL {
            return None;
        }
        let frames = self.frames;
        self.frames = 0;
        self.last_report = Some(now);
        Some(frames)
    }

    /// Frames counted in the current window.
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}
