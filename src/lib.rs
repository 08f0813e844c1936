//! # camshift-rs - Mode-seeking window tracking
//!
//! Mean-Shift and CAMShift (Continuously Adaptive Mean-Shift) over a per-frame
//! probability map, such as the output of a hue-histogram back-projection.
//!
//! ## Features
//!
//! - Weighted-region moments (raw and central) over clipped sub-regions
//! - Mean-Shift re-centering with a whole-map fallback when track is lost
//! - CAMShift resizing from the second-moment ellipse of the converged region
//! - Frame-by-frame tracking sessions
//!
//! ## Example
//!
//! ```rust
//! use camshift_rs::{cam_shift, ProbabilityMap, StopCriteria, Window};
//!
//! let map = ProbabilityMap::from_fn(20, 20, |x, y| {
//!     if (9..=11).contains(&x) && (9..=11).contains(&y) {
//!         1.0
//!     } else {
//!         0.0
//!     }
//! });
//! let window = Window::new(5, 5, 4, 4).unwrap();
//! let criteria = StopCriteria::new(20, 0.5).unwrap();
//!
//! let result = cam_shift(&map, &window, &criteria).unwrap();
//! assert!(result.converged);
//! ```

// Public modules
pub mod probability;
pub mod window;
pub mod criteria;
pub mod moments;
pub mod shift;
pub mod session;

// Optional modules
#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use probability::ProbabilityMap;
pub use window::{Region, Window};
pub use criteria::StopCriteria;
pub use moments::{compute_moments, compute_spatial_moments, Moments, DEGENERACY_THRESHOLD};
pub use shift::{
    cam_shift, cam_shift_with_config, mean_shift, tracker_by_name, CamShift, CamShiftConfig,
    ConvergenceResult, EllipseFit, MeanShift, TrackerKind, WindowTracker,
};
pub use session::TrackingSession;

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the camshift library
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid stop criteria: {0}")]
        InvalidCriteria(String),

        #[error("Invalid window: {0}")]
        InvalidWindow(String),

        #[error("Invalid probability map: {0}")]
        InvalidProbabilityMap(String),

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Unknown tracker: {0}")]
        UnknownTracker(String),
    }

    /// Result type for camshift operations
    pub type Result<T> = std::result::Result<T, Error>;
}
