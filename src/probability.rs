//! Probability map input for the trackers.

use nalgebra::DMatrix;
use crate::{Error, Result};

/// Per-pixel likelihood that a pixel belongs to the tracked object.
///
/// Stored as a `height x width` matrix: row index is `y`, column index is `x`.
/// Values are non-negative and finite; no upper bound and no normalization
/// is assumed. An all-zero map is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    data: DMatrix<f64>,
}

impl ProbabilityMap {
    /// Wrap an existing matrix (rows = height, cols = width).
    ///
    /// # Errors
    /// Returns `InvalidProbabilityMap` if any weight is negative, NaN or infinite.
    pub fn new(data: DMatrix<f64>) -> Result<Self> {
        if let Some((idx, value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            // DMatrix storage is column-major
            let (y, x) = (idx % data.nrows(), idx / data.nrows());
            return Err(Error::InvalidProbabilityMap(format!(
                "weight at (x={}, y={}) must be finite and non-negative, got {}",
                x, y, value
            )));
        }

        Ok(Self { data })
    }

    /// Create an all-zero map.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            data: DMatrix::zeros(height, width),
        }
    }

    /// Create a map from a row-major slice of weights.
    pub fn from_row_slice(height: usize, width: usize, weights: &[f64]) -> Result<Self> {
        if weights.len() != height * width {
            return Err(Error::InvalidProbabilityMap(format!(
                "slice length {} doesn't match {}x{}",
                weights.len(),
                height,
                width
            )));
        }

        Self::new(DMatrix::from_row_slice(height, width, weights))
    }

    /// Create a map from row-major bytes, e.g. a back-projection image.
    ///
    /// Byte values are taken verbatim (0..=255), not rescaled.
    pub fn from_u8(height: usize, width: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != height * width {
            return Err(Error::InvalidProbabilityMap(format!(
                "byte buffer length {} doesn't match {}x{}",
                bytes.len(),
                height,
                width
            )));
        }

        Ok(Self {
            data: DMatrix::from_fn(height, width, |y, x| f64::from(bytes[y * width + x])),
        })
    }

    /// Build a map by evaluating `f(x, y)` at every pixel.
    ///
    /// Negative or non-finite outputs are clamped to zero.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let data = DMatrix::from_fn(height, width, |y, x| {
            let v = f(x, y);
            if v.is_finite() && v > 0.0 { v } else { 0.0 }
        });
        Self { data }
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Weight at pixel `(x, y)`, or `None` outside the map.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.data.get((y, x)).copied()
    }

    /// Weight at pixel `(x, y)` without an `Option`.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the map.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> f64 {
        self.data[(y, x)]
    }

    /// Borrow the underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Consume the map, returning the underlying matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.data
    }
}
