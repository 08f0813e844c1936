//! Stop criteria for the iterative trackers.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// When to stop the Mean-Shift refinement loop.
///
/// A plain record supplied fresh with every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopCriteria {
    /// Hard cap on re-centering steps per call.
    pub max_iterations: usize,

    /// Convergence threshold on the corner shift, in pixels.
    /// A step moving the window by less than this counts as converged.
    pub epsilon: f64,
}

impl StopCriteria {
    /// Create validated stop criteria.
    ///
    /// # Arguments
    /// * `max_iterations` - Maximum re-centering steps (must be positive)
    /// * `epsilon` - Shift threshold in pixels (non-negative, not NaN). `0.0` never
    ///   converges; `f64::INFINITY` converges after the first step.
    pub fn new(max_iterations: usize, epsilon: f64) -> Result<Self> {
        let criteria = Self { max_iterations, epsilon };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Reject malformed criteria before any iteration runs.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidCriteria(
                "max_iterations must be positive".to_string(),
            ));
        }

        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(Error::InvalidCriteria(format!(
                "epsilon must be non-negative, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }
}

impl Default for StopCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            epsilon: 1.0,
        }
    }
}
