//! Mode-seeking window trackers.
//!
//! This module provides:
//! - `mean_shift` - fixed-size re-centering on the local mass centroid
//! - `cam_shift` - Mean-Shift plus size refit from the equivalent ellipse
//! - `WindowTracker` trait and `TrackerKind` enum dispatch
//!
//! Both engines are pure functions of (map, window, criteria): no state is kept
//! between calls, and the caller feeds each output window into the next call.

mod traits;
mod mean_shift;
mod cam_shift;
mod ellipse;
mod dispatch;

pub use traits::WindowTracker;
pub use mean_shift::{mean_shift, MeanShift};
pub use cam_shift::{cam_shift, cam_shift_with_config, CamShift, CamShiftConfig};
pub use ellipse::EllipseFit;
pub use dispatch::{tracker_by_name, TrackerKind};

use serde::{Deserialize, Serialize};
use crate::Window;

/// Outcome of one tracker call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceResult {
    /// Whether the last step moved the window by less than epsilon.
    pub converged: bool,

    /// Updated window; the input window when nothing could be tracked.
    pub window: Window,

    /// Re-centering steps performed.
    pub iterations: usize,

    /// Fitted ellipse when CAMShift resized the window.
    pub ellipse: Option<EllipseFit>,
}

impl ConvergenceResult {
    pub(crate) fn new(converged: bool, window: Window, iterations: usize) -> Self {
        Self {
            converged,
            window,
            iterations,
            ellipse: None,
        }
    }

    /// `(converged, (x, y, width, height))`.
    pub fn as_tuple(&self) -> (bool, (i32, i32, i32, i32)) {
        (self.converged, self.window.as_tuple())
    }
}
