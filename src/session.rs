//! Frame-by-frame tracking session.

use crate::{
    ConvergenceResult, Error, ProbabilityMap, Result, StopCriteria, TrackerKind, Window,
};

/// Default number of consecutive non-converged frames before a warning.
const DEFAULT_LOST_WARNING_FRAMES: usize = 30;

/// Tracks one object across the frames of one stream.
///
/// The engines are stateless; a session only remembers the last window and
/// feeds it into the next call, plus a few counters.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    /// Tracker used for every frame.
    pub tracker: TrackerKind,

    /// Stop criteria used for every frame.
    pub criteria: StopCriteria,

    lost_warning_frames: usize,
    window: Window,
    frame_count: usize,
    consecutive_misses: usize,
    last_result: Option<ConvergenceResult>,
}

impl TrackingSession {
    /// Create a session starting from `initial_window`.
    pub fn new(
        tracker: TrackerKind,
        initial_window: Window,
        criteria: StopCriteria,
    ) -> Result<Self> {
        criteria.validate()?;
        initial_window.validate()?;

        Ok(Self {
            tracker,
            criteria,
            lost_warning_frames: DEFAULT_LOST_WARNING_FRAMES,
            window: initial_window,
            frame_count: 0,
            consecutive_misses: 0,
            last_result: None,
        })
    }

    /// Create a session from a tracker name (see `tracker_by_name`).
    pub fn from_tracker_name(
        name: &str,
        initial_window: Window,
        criteria: StopCriteria,
    ) -> Result<Self> {
        Self::new(crate::tracker_by_name(name)?, initial_window, criteria)
    }

    /// Warn after `frames` consecutive non-converged frames (default 30).
    ///
    /// # Errors
    /// `InvalidConfig` if `frames` is zero.
    pub fn with_lost_warning_frames(mut self, frames: usize) -> Result<Self> {
        if frames == 0 {
            return Err(Error::InvalidConfig(
                "lost_warning_frames must be positive".to_string(),
            ));
        }
        self.lost_warning_frames = frames;
        Ok(self)
    }

    /// Track on the next frame's probability map.
    ///
    /// The returned window becomes the input window of the following call,
    /// whether or not the tracker converged.
    pub fn update(&mut self, map: &ProbabilityMap) -> Result<ConvergenceResult> {
        let result = self.tracker.track(map, &self.window, &self.criteria)?;
        self.frame_count += 1;

        if result.converged {
            self.consecutive_misses = 0;
        } else {
            self.consecutive_misses += 1;
            if self.consecutive_misses == self.lost_warning_frames {
                log::warn!(
                    "{}: no convergence for {} consecutive frames (frame {}), window {:?}",
                    self.tracker.name(),
                    self.consecutive_misses,
                    self.frame_count,
                    result.window
                );
            }
        }

        log::debug!(
            "{}: frame {} converged={} iterations={} window={:?}",
            self.tracker.name(),
            self.frame_count,
            result.converged,
            result.iterations,
            result.window
        );

        self.window = result.window;
        self.last_result = Some(result);
        Ok(result)
    }

    /// Restart from a new window (e.g. a fresh detection), clearing counters
    /// that describe the current track.
    pub fn reset(&mut self, window: Window) -> Result<()> {
        window.validate()?;
        self.window = window;
        self.consecutive_misses = 0;
        self.last_result = None;
        Ok(())
    }

    /// Window that the next `update` starts from.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Consecutive non-converged frames after which a warning is logged.
    pub fn lost_warning_frames(&self) -> usize {
        self.lost_warning_frames
    }

    /// Frames processed so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Non-converged frames since the last converged one.
    pub fn consecutive_misses(&self) -> usize {
        self.consecutive_misses
    }

    /// Result of the most recent `update`.
    pub fn last_result(&self) -> Option<&ConvergenceResult> {
        self.last_result.as_ref()
    }
}
