//! Integration tests for camshift-rs.
//!
//! These tests exercise complete tracking workflows through the public API.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_relative_eq;
use camshift_rs::{
    cam_shift, cam_shift_with_config, mean_shift, CamShiftConfig, Error, ProbabilityMap,
    StopCriteria, TrackerKind, TrackingSession, Window,
};

// =============================================================================
// Helpers
// =============================================================================

/// Gaussian blob with standard deviations `major`/`minor` along an axis at `angle`.
fn rotated_gaussian(
    size: usize,
    cx: f64,
    cy: f64,
    major: f64,
    minor: f64,
    angle: f64,
) -> ProbabilityMap {
    let (sin_a, cos_a) = angle.sin_cos();
    ProbabilityMap::from_fn(size, size, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let u = (dx * cos_a + dy * sin_a) / major;
        let v = (-dx * sin_a + dy * cos_a) / minor;
        (-0.5 * (u * u + v * v)).exp()
    })
}

fn gaussian(size: usize, cx: f64, cy: f64, sigma: f64) -> ProbabilityMap {
    rotated_gaussian(size, cx, cy, sigma, sigma, 0.0)
}

fn block(height: usize, width: usize, x0: usize, y0: usize, w: usize, h: usize) -> ProbabilityMap {
    ProbabilityMap::from_fn(height, width, |x, y| {
        if (x0..x0 + w).contains(&x) && (y0..y0 + h).contains(&y) {
            1.0
        } else {
            0.0
        }
    })
}

fn criteria(max_iterations: usize, epsilon: f64) -> StopCriteria {
    StopCriteria::new(max_iterations, epsilon).expect("valid criteria")
}

// =============================================================================
// Test 1: Degenerate maps
// =============================================================================

#[test]
fn test_integration_all_zero_map_keeps_window() {
    let map = ProbabilityMap::zeros(32, 48);
    let window = Window::new(10, 12, 7, 9).unwrap();

    for budget in [1, 5, 100] {
        let result = mean_shift(&map, &window, &criteria(budget, 0.5)).unwrap();
        assert!(!result.converged, "budget {}: should not converge", budget);
        assert_eq!(result.window, window, "budget {}: window must be unchanged", budget);

        let result = cam_shift(&map, &window, &criteria(budget, 0.5)).unwrap();
        assert!(!result.converged);
        assert_eq!(result.window, window);
    }
}

#[test]
fn test_integration_invalid_criteria_rejected() {
    let map = gaussian(20, 10.0, 10.0, 2.0);
    let window = Window::new(5, 5, 10, 10).unwrap();

    let zero_budget = StopCriteria { max_iterations: 0, epsilon: 1.0 };
    assert!(matches!(
        mean_shift(&map, &window, &zero_budget),
        Err(Error::InvalidCriteria(_))
    ));

    let negative_eps = StopCriteria { max_iterations: 5, epsilon: -1.0 };
    assert!(matches!(
        cam_shift(&map, &window, &negative_eps),
        Err(Error::InvalidCriteria(_))
    ));
}

// =============================================================================
// Test 2: Mean-Shift convergence
// =============================================================================

#[test]
fn test_integration_pixel_at_center_converges_in_one_step() {
    let window = Window::new(20, 14, 10, 6).unwrap();
    // center (25, 17)
    let map = ProbabilityMap::from_fn(40, 40, |x, y| if (x, y) == (25, 17) { 1.0 } else { 0.0 });

    let result = mean_shift(&map, &window, &criteria(10, 0.5)).unwrap();
    assert!(result.converged);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.window, window);
}

#[test]
fn test_integration_concrete_block_scenario() {
    // 20x20, 3x3 block of 1.0 centered at (10, 10)
    let map = block(20, 20, 9, 9, 3, 3);
    let window = Window::new(5, 5, 4, 4).unwrap();

    let result = mean_shift(&map, &window, &criteria(20, 0.5)).unwrap();
    assert!(result.converged);

    let (cx, cy) = result.window.center();
    assert!((cx - 10.0).abs() <= 1.0, "center x = {}", cx);
    assert!((cy - 10.0).abs() <= 1.0, "center y = {}", cy);
    assert_eq!((result.window.width, result.window.height), (4, 4));
}

#[test]
fn test_integration_repeated_calls_reach_blob() {
    let map = gaussian(80, 55.0, 50.0, 6.0);
    let mut window = Window::new(20, 20, 16, 16).unwrap();
    let stop = criteria(5, 0.5);

    let mut converged = false;
    for _ in 0..10 {
        let result = mean_shift(&map, &window, &stop).unwrap();
        window = result.window;
        converged = result.converged;
        if converged {
            break;
        }
    }

    assert!(converged, "should converge within 10 calls");
    let (cx, cy) = window.center();
    assert!((cx - 55.0).abs() <= 1.5, "center x = {}", cx);
    assert!((cy - 50.0).abs() <= 1.5, "center y = {}", cy);
}

#[test]
fn test_integration_idempotent_after_convergence() {
    let map = gaussian(64, 30.0, 34.0, 4.0);
    let window = Window::new(16, 20, 12, 12).unwrap();
    let stop = criteria(30, 0.5);

    let first = mean_shift(&map, &window, &stop).unwrap();
    assert!(first.converged);

    let second = mean_shift(&map, &first.window, &stop).unwrap();
    assert!(second.converged);
    assert_eq!(second.iterations, 1);
    assert_eq!(second.window, first.window);
}

#[test]
fn test_integration_window_outside_map_recovers() {
    let map = gaussian(50, 25.0, 25.0, 3.0);
    // Completely outside: falls back to the whole-map centroid
    let window = Window::new(200, -80, 10, 10).unwrap();

    let result = mean_shift(&map, &window, &criteria(10, 0.5)).unwrap();
    assert!(result.converged);
    let (cx, cy) = result.window.center();
    assert!((cx - 25.0).abs() <= 1.0);
    assert!((cy - 25.0).abs() <= 1.0);
}

// =============================================================================
// Test 3: CAMShift shape adaptation
// =============================================================================

#[test]
fn test_integration_cam_shift_isotropic_blob_is_square() {
    let map = gaussian(100, 50.0, 50.0, 6.0);
    let window = Window::new(40, 40, 20, 20).unwrap();

    let result = cam_shift(&map, &window, &criteria(20, 0.5)).unwrap();
    assert!(result.converged);

    let (w, h) = (f64::from(result.window.width), f64::from(result.window.height));
    assert!((w - h).abs() / w.max(h) < 0.1, "window {:?} is not square", result.window);

    let ellipse = result.ellipse.unwrap();
    assert_relative_eq!(ellipse.major_axis, ellipse.minor_axis, max_relative = 1e-6);
}

#[test]
fn test_integration_cam_shift_horizontal_blob() {
    let map = rotated_gaussian(100, 50.0, 50.0, 10.0, 3.0, 0.0);
    let window = Window::new(40, 45, 20, 10).unwrap();

    let result = cam_shift(&map, &window, &criteria(20, 0.5)).unwrap();
    assert!(result.converged);
    assert!(result.window.width > result.window.height, "window {:?}", result.window);

    let ellipse = result.ellipse.expect("resized window carries its ellipse");
    assert!(ellipse.theta.abs() < 0.05, "theta = {}", ellipse.theta);
    assert!(ellipse.major_axis > ellipse.minor_axis);
}

#[test]
fn test_integration_cam_shift_vertical_blob() {
    // Slightly off vertical so the lean direction is not decided by rounding noise
    let angle = FRAC_PI_2 - 0.1;
    let map = rotated_gaussian(100, 50.0, 50.0, 10.0, 3.0, angle);
    let window = Window::new(45, 40, 10, 20).unwrap();

    let result = cam_shift(&map, &window, &criteria(20, 0.5)).unwrap();
    assert!(result.converged);
    assert!(result.window.height > result.window.width, "window {:?}", result.window);
    assert_eq!(result.window.as_tuple(), (40, 35, 16, 36));

    let ellipse = result.ellipse.unwrap();
    assert!((ellipse.theta - angle).abs() < 0.05, "theta = {}", ellipse.theta);
}

#[test]
fn test_integration_cam_shift_diagonal_orientation() {
    let window = Window::new(40, 40, 20, 20).unwrap();
    let stop = criteria(20, 0.5);

    // Major axis along +x/+y (down-right in image coordinates)
    let map = rotated_gaussian(100, 50.0, 50.0, 10.0, 3.0, FRAC_PI_4);
    let result = cam_shift(&map, &window, &stop).unwrap();
    let ellipse = result.ellipse.unwrap();
    assert_relative_eq!(ellipse.theta, FRAC_PI_4, epsilon = 0.05);

    // Major axis along +x/-y
    let map = rotated_gaussian(100, 50.0, 50.0, 10.0, 3.0, -FRAC_PI_4);
    let result = cam_shift(&map, &window, &stop).unwrap();
    let mirrored = result.ellipse.unwrap();
    assert_relative_eq!(mirrored.theta, -FRAC_PI_4, epsilon = 0.05);

    // Mirror images give (nearly) the same axes; the grown region is not mirror-symmetric
    assert_relative_eq!(ellipse.major_axis, mirrored.major_axis, epsilon = 0.1);
    assert_relative_eq!(ellipse.minor_axis, mirrored.minor_axis, epsilon = 0.1);
    assert_eq!(result.window.as_tuple(), (35, 35, 29, 29));
}

#[test]
fn test_integration_cam_shift_lean_changes_box() {
    // Steep staircases leaning the two ways around the vertical
    let staircase = |down: bool| {
        ProbabilityMap::from_fn(50, 50, |x, y| {
            let on_step = (0..6).any(|i| {
                let x0 = 20 + 2 * i;
                let y0 = if down { 10 + 4 * i } else { 30 - 4 * i };
                (x0..x0 + 3).contains(&x) && (y0..y0 + 4).contains(&y)
            });
            if on_step {
                1.0
            } else {
                0.0
            }
        })
    };
    let window = Window::new(18, 18, 10, 10).unwrap();
    let stop = criteria(20, 0.5);

    let down = cam_shift(&staircase(true), &window, &stop).unwrap();
    assert!(down.ellipse.unwrap().theta > 0.0);
    assert_eq!(down.window.as_tuple(), (15, 11, 23, 28));

    let up = cam_shift(&staircase(false), &window, &stop).unwrap();
    assert!(up.ellipse.unwrap().theta < 0.0);
    assert_eq!(up.window.as_tuple(), (15, 13, 14, 12));
}

#[test]
fn test_integration_cam_shift_at_map_corner() {
    // Converged window plus margin hangs over the top-left corner
    let map = block(40, 40, 0, 0, 5, 3);
    let window = Window::new(2, 1, 10, 10).unwrap();

    let result = cam_shift(&map, &window, &criteria(20, 0.5)).unwrap();
    assert!(result.converged);
    assert!(result.window.x < 0 || result.window.y < 0, "window {:?}", result.window);
    assert!(result.window.width >= 10);
    assert!(result.window.height >= 10);
    assert_eq!(result.window.as_tuple(), (-8, -9, 10, 10));
    assert!(result.ellipse.is_some());
}

#[test]
fn test_integration_cam_shift_respects_min_side() {
    let stop = criteria(20, 0.5);

    // Single pixel: the fitted ellipse has zero size
    let map = ProbabilityMap::from_fn(30, 30, |x, y| {
        if (x, y) == (15, 15) {
            1.0
        } else {
            0.0
        }
    });
    let result = cam_shift(&map, &Window::new(11, 11, 8, 8).unwrap(), &stop).unwrap();
    assert!(result.converged);
    assert_eq!((result.window.width, result.window.height), (10, 10));

    // One-pixel-tall bar: wide but never thinner than the minimum
    let map = block(60, 60, 10, 30, 40, 1);
    let result = cam_shift(&map, &Window::new(20, 24, 20, 12).unwrap(), &stop).unwrap();
    assert!(result.converged);
    assert_eq!(result.window.height, 10);
    assert!(result.window.width > 10);

    // Blobs of many sizes
    for sigma in [0.3, 0.8, 1.5, 3.0, 6.0] {
        let map = gaussian(60, 30.0, 30.0, sigma);
        let result = cam_shift(&map, &Window::new(24, 24, 12, 12).unwrap(), &stop).unwrap();
        assert!(result.window.width >= 10, "sigma {}: {:?}", sigma, result.window);
        assert!(result.window.height >= 10, "sigma {}: {:?}", sigma, result.window);
    }
}

#[test]
fn test_integration_cam_shift_custom_config() {
    let map = gaussian(100, 50.0, 50.0, 6.0);
    let window = Window::new(40, 40, 20, 20).unwrap();
    let stop = criteria(20, 0.5);

    let config = CamShiftConfig::new(10, 40, 1.2).unwrap();
    let result = cam_shift_with_config(&map, &window, &stop, &config).unwrap();
    assert!(result.converged);
    assert!(result.window.width >= 40);
    assert!(result.window.height >= 40);

    let default = cam_shift(&map, &window, &stop).unwrap();
    assert_eq!(result.window.x, default.window.x - 5);
}

// =============================================================================
// Test 4: Sessions over a moving target
// =============================================================================

#[test]
fn test_integration_session_follows_moving_blob() {
    for kind in [TrackerKind::mean_shift(), TrackerKind::cam_shift()] {
        let mut session =
            TrackingSession::new(kind, Window::new(12, 22, 16, 16).unwrap(), criteria(10, 0.5))
                .expect("valid session");

        let mut last_center = (0.0, 0.0);
        for frame in 0..20 {
            let cx = 20.0 + 2.0 * frame as f64;
            let cy = 30.0 + 1.0 * frame as f64;
            last_center = (cx, cy);

            let map = rotated_gaussian(100, cx, cy, 8.0, 4.0, 0.0);
            let result = session.update(&map).unwrap();
            assert!(result.converged, "{}: frame {} did not converge", kind.name(), frame);
        }

        let w = session.window();
        let (cx, cy) = last_center;
        assert!(
            f64::from(w.x) <= cx && cx < f64::from(w.x + w.width),
            "{}: x {} outside {:?}",
            kind.name(),
            cx,
            w
        );
        assert!(
            f64::from(w.y) <= cy && cy < f64::from(w.y + w.height),
            "{}: y {} outside {:?}",
            kind.name(),
            cy,
            w
        );
        assert_eq!(session.frame_count(), 20);
        assert_eq!(session.consecutive_misses(), 0);
    }
}

#[test]
fn test_integration_session_survives_empty_frames() {
    let mut session = TrackingSession::from_tracker_name(
        "meanshift",
        Window::new(20, 20, 10, 10).unwrap(),
        criteria(10, 0.5),
    )
    .unwrap();

    session.update(&gaussian(60, 25.0, 25.0, 3.0)).unwrap();
    let tracked = session.window();

    // Object disappears for a few frames: window is held
    for _ in 0..3 {
        let result = session.update(&ProbabilityMap::zeros(60, 60)).unwrap();
        assert!(!result.converged);
        assert_eq!(result.window, tracked);
    }
    assert_eq!(session.consecutive_misses(), 3);

    // Object reappears elsewhere: whole-map fallback reacquires it
    let result = session.update(&gaussian(60, 45.0, 40.0, 3.0)).unwrap();
    assert!(result.converged);
    let (cx, cy) = result.window.center();
    assert!((cx - 45.0).abs() <= 1.0);
    assert!((cy - 40.0).abs() <= 1.0);
}

// =============================================================================
// Test 5: Concurrent independent sessions
// =============================================================================

#[test]
fn test_integration_parallel_sessions() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let center = 20.0 + 5.0 * i as f64;
                let map = gaussian(64, center, center, 4.0);
                let window = Window::new(10, 10, 12, 12).unwrap();
                let kind = TrackerKind::mean_shift();
                let mut session = TrackingSession::new(kind, window, criteria(50, 0.5)).unwrap();
                let result = session.update(&map).unwrap();
                (center, result)
            })
        })
        .collect();

    for handle in handles {
        let (center, result) = handle.join().expect("thread panicked");
        assert!(result.converged);
        let (cx, cy) = result.window.center();
        assert!((cx - center).abs() <= 1.0, "{} vs {}", cx, center);
        assert!((cy - center).abs() <= 1.0, "{} vs {}", cy, center);
    }
}
