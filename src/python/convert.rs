//! Conversions between numpy/Python values and crate types.

use nalgebra::DMatrix;
use numpy::PyReadonlyArray2;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::{Error, ProbabilityMap, StopCriteria, Window};

/// Convert a crate error into a Python `ValueError`.
pub(crate) fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Read a 2D numpy array (float64, float32 or uint8) as a probability map.
///
/// uint8 arrays (OpenCV back-projections) are taken verbatim, not rescaled.
pub(crate) fn extract_map<'py>(obj: &Bound<'py, PyAny>) -> PyResult<ProbabilityMap> {
    if let Ok(arr) = obj.extract::<PyReadonlyArray2<'py, f64>>() {
        let view = arr.as_array();
        let matrix = DMatrix::from_fn(view.nrows(), view.ncols(), |r, c| view[[r, c]]);
        return ProbabilityMap::new(matrix).map_err(to_py_err);
    }

    if let Ok(arr) = obj.extract::<PyReadonlyArray2<'py, f32>>() {
        let view = arr.as_array();
        let matrix = DMatrix::from_fn(view.nrows(), view.ncols(), |r, c| f64::from(view[[r, c]]));
        return ProbabilityMap::new(matrix).map_err(to_py_err);
    }

    if let Ok(arr) = obj.extract::<PyReadonlyArray2<'py, u8>>() {
        let view = arr.as_array();
        let matrix = DMatrix::from_fn(view.nrows(), view.ncols(), |r, c| f64::from(view[[r, c]]));
        return ProbabilityMap::new(matrix).map_err(to_py_err);
    }

    Err(PyTypeError::new_err(
        "prob_image must be a 2D numpy array of float64, float32 or uint8",
    ))
}

pub(crate) fn window_from_tuple(window: (i32, i32, i32, i32)) -> PyResult<Window> {
    Window::try_from(window).map_err(to_py_err)
}

pub(crate) fn criteria(max_iter: usize, epsilon: f64) -> PyResult<StopCriteria> {
    StopCriteria::new(max_iter, epsilon).map_err(to_py_err)
}
