//! Python wrapper for TrackingSession.

use pyo3::prelude::*;

use crate::{tracker_by_name, CamShiftConfig, TrackerKind, TrackingSession};
use super::convert::{criteria, extract_map, to_py_err, window_from_tuple};

/// Frame-by-frame window tracker.
///
/// Example:
///     >>> from camshift_rs import Tracker
///     >>> tracker = Tracker((57, 21, 31, 45), tracker="camshift", max_iter=10, epsilon=1.0)
///     >>> for prob in back_projections:
///     ...     converged, window = tracker.update(prob)
#[pyclass(name = "Tracker")]
pub struct PyTracker {
    inner: TrackingSession,
}

#[pymethods]
impl PyTracker {
    /// Create a new Tracker.
    ///
    /// Args:
    ///     window: Initial (x, y, width, height).
    ///     tracker: "meanshift" or "camshift". Default: "camshift".
    ///     max_iter: Maximum re-centering steps per frame. Default: 10.
    ///     epsilon: Convergence shift threshold in pixels. Default: 1.0.
    ///     margin: CAMShift refit margin in pixels. Default: 5.
    ///     min_side_length: CAMShift minimum window side. Default: 10.
    #[new]
    #[pyo3(signature = (
        window,
        tracker="camshift",
        max_iter=10,
        epsilon=1.0,
        margin=5,
        min_side_length=10
    ))]
    fn new(
        window: (i32, i32, i32, i32),
        tracker: &str,
        max_iter: usize,
        epsilon: f64,
        margin: i32,
        min_side_length: i32,
    ) -> PyResult<Self> {
        let kind = match tracker_by_name(tracker).map_err(to_py_err)? {
            TrackerKind::CamShift(_) => TrackerKind::cam_shift_with_config(CamShiftConfig {
                margin,
                min_side_length,
                ..CamShiftConfig::default()
            })
            .map_err(to_py_err)?,
            other => other,
        };

        let window = window_from_tuple(window)?;
        let criteria = criteria(max_iter, epsilon)?;
        let session = TrackingSession::new(kind, window, criteria).map_err(to_py_err)?;

        Ok(Self { inner: session })
    }

    /// Track on the next frame.
    ///
    /// Args:
    ///     prob_image: 2D array of per-pixel probabilities for this frame.
    ///
    /// Returns:
    ///     (converged, (x, y, width, height))
    fn update(&mut self, prob_image: &Bound<'_, PyAny>) -> PyResult<(bool, (i32, i32, i32, i32))> {
        let map = extract_map(prob_image)?;
        let result = self.inner.update(&map).map_err(to_py_err)?;
        Ok(result.as_tuple())
    }

    /// Restart tracking from a new window.
    fn reset(&mut self, window: (i32, i32, i32, i32)) -> PyResult<()> {
        self.inner.reset(window_from_tuple(window)?).map_err(to_py_err)
    }

    /// Window the next update starts from.
    #[getter]
    fn window(&self) -> (i32, i32, i32, i32) {
        self.inner.window().as_tuple()
    }

    /// Frames processed so far.
    #[getter]
    fn frame_count(&self) -> usize {
        self.inner.frame_count()
    }

    /// Non-converged frames since the last converged one.
    #[getter]
    fn consecutive_misses(&self) -> usize {
        self.inner.consecutive_misses()
    }

    fn __repr__(&self) -> String {
        format!(
            "Tracker(tracker={:?}, window={:?}, frame_count={})",
            self.inner.tracker.name(),
            self.inner.window().as_tuple(),
            self.inner.frame_count()
        )
    }
}
