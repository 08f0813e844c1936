//! Stateless `mean_shift` / `cam_shift` functions.

use pyo3::prelude::*;

use crate::CamShiftConfig;
use super::convert::{criteria, extract_map, to_py_err, window_from_tuple};

type PyWindow = (i32, i32, i32, i32);

/// Update a tracking window with Mean-Shift.
///
/// Args:
///     prob_image: 2D array of per-pixel probabilities (height, width).
///     window: (x, y, width, height) of the previous window.
///     max_iter: Maximum number of re-centering steps. Default: 10.
///     epsilon: Shift (pixels) under which the window counts as converged. Default: 1.0.
///
/// Returns:
///     (converged, (x, y, width, height))
#[pyfunction]
#[pyo3(signature = (prob_image, window, max_iter=10, epsilon=1.0))]
pub fn mean_shift(
    prob_image: &Bound<'_, PyAny>,
    window: PyWindow,
    max_iter: usize,
    epsilon: f64,
) -> PyResult<(bool, PyWindow)> {
    let map = extract_map(prob_image)?;
    let window = window_from_tuple(window)?;
    let criteria = criteria(max_iter, epsilon)?;

    let result = crate::mean_shift(&map, &window, &criteria).map_err(to_py_err)?;
    Ok(result.as_tuple())
}

/// Update a tracking window with CAMShift.
///
/// Args:
///     prob_image: 2D array of per-pixel probabilities (height, width).
///     window: (x, y, width, height) of the previous window.
///     max_iter: Maximum number of re-centering steps. Default: 10.
///     epsilon: Shift (pixels) under which the window counts as converged. Default: 1.0.
///     margin: Pixels added on each side before refitting the size. Default: 5.
///     min_side_length: Smallest allowed width/height. Default: 10.
///
/// Returns:
///     (converged, (x, y, width, height))
#[pyfunction]
#[pyo3(signature = (prob_image, window, max_iter=10, epsilon=1.0, margin=5, min_side_length=10))]
pub fn cam_shift(
    prob_image: &Bound<'_, PyAny>,
    window: PyWindow,
    max_iter: usize,
    epsilon: f64,
    margin: i32,
    min_side_length: i32,
) -> PyResult<(bool, PyWindow)> {
    let map = extract_map(prob_image)?;
    let window = window_from_tuple(window)?;
    let criteria = criteria(max_iter, epsilon)?;
    let config = CamShiftConfig {
        margin,
        min_side_length,
        ..CamShiftConfig::default()
    };

    let result =
        crate::cam_shift_with_config(&map, &window, &criteria, &config).map_err(to_py_err)?;
    Ok(result.as_tuple())
}
