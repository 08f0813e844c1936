//! Python bindings for camshift-rs using PyO3.
//!
//! The function-level API mirrors OpenCV's call shape:
//! `ret, window = cam_shift(prob_image, window, max_iter, epsilon)`.

use pyo3::prelude::*;

mod convert;
mod functions;
mod tracker;

pub use tracker::PyTracker;

/// Python module for camshift-rs.
///
/// The function is named `_camshift_rs` with underscore prefix for mixed Python/Rust projects.
#[pymodule]
fn _camshift_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Stateless engines
    m.add_function(wrap_pyfunction!(functions::mean_shift, m)?)?;
    m.add_function(wrap_pyfunction!(functions::cam_shift, m)?)?;

    // Frame-by-frame tracker
    m.add_class::<PyTracker>()?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
