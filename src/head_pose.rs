//! Head pose estimation: raw landmark frames to a smoothed physical eye
//! position.
//!
//! Lateral position comes from the nose tip mapped across the screen
//! rectangle; depth comes from the apparent iris size via the pinhole camera
//! model (the human iris diameter is close to constant, so its pixel width
//! encodes distance once the camera's focal length is known). The result is
//! smoothed by the [`PointFilter`] stack before being handed to the
//! projection solver.

use nalgebra::Point3;

use crate::{
    config::Config,
    constants::{IRIS_DIAMETER_MM, MIN_IRIS_WIDTH_PX},
    filters::PointFilter,
    landmarks::{iris_width_px, nose_tip, validate_frame, Landmark},
    Error, Result,
};

/// Viewer eye position in millimetres, screen-centered, right-handed,
/// +X right, +Y up, +Z toward the viewer
pub type EyePosition = Point3<f64>;

/// Per-axis sensitivity multipliers applied before smoothing
#[derive(Debug, Clone, Copy)]
struct Sensitivity {
    x: f64,
    y: f64,
    z: f64,
}

/// Maps raw per-frame landmarks to a stable eye position in millimetres.
///
/// Owns all smoothing state; one instance per tracked viewer. All methods
/// are non-blocking and meant to be driven from a single thread at whatever
/// cadence the tracker delivers frames.
pub struct HeadPoseEstimator {
    screen_width_mm: f64,
    screen_height_mm: f64,
    default_distance_mm: f64,
    video_width_px: f64,
    sensitivity: Sensitivity,
    use_iris_depth: bool,
    focal_length_px: Option<f64>,
    filter: PointFilter,
    tracking: bool,
}

impl HeadPoseEstimator {
    /// Create an estimator from a validated configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            screen_width_mm: config.screen.width_mm,
            screen_height_mm: config.screen.height_mm,
            default_distance_mm: config.screen.default_distance_mm,
            video_width_px: config.video.width_px,
            sensitivity: Sensitivity {
                x: config.tracking.sensitivity_x,
                y: config.tracking.sensitivity_y,
                z: config.tracking.sensitivity_z,
            },
            use_iris_depth: config.tracking.use_iris_depth,
            focal_length_px: config.tracking.focal_length_px,
            filter: PointFilter::new(
                config.smoothing.min_cutoff_hz,
                config.smoothing.beta,
                config.smoothing.d_cutoff_hz,
                config.smoothing.dead_zone_mm,
            ),
            tracking: false,
        }
    }

    /// Estimate the eye position from one landmark frame.
    ///
    /// `landmarks` is `None` (or empty) when no subject was detected — a
    /// normal steady state, answered with `Ok(None)`. The first lost frame
    /// after a tracked one resets the smoothing filters so reacquisition
    /// does not blend against stale history.
    ///
    /// `timestamp` is in seconds from any monotonic clock; it only has to be
    /// consistent across calls on the same estimator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a non-empty frame does not carry
    /// the full landmark set (tracker contract violation).
    pub fn estimate(
        &mut self,
        landmarks: Option<&[Landmark]>,
        timestamp: f64,
    ) -> Result<Option<EyePosition>> {
        let frame = match landmarks {
            Some(frame) if !frame.is_empty() => frame,
            _ => {
                if self.tracking {
                    log::debug!("Tracking lost, resetting smoothing state");
                    self.filter.reset();
                    self.tracking = false;
                }
                return Ok(None);
            }
        };
        validate_frame(frame)?;
        self.tracking = true;

        // Nose tip across the screen rectangle; normalized Y grows downward
        // while world Y grows upward. Selfie mirroring is already applied
        // upstream, so X is not flipped here.
        let nose = nose_tip(frame);
        let mut x = (nose.x - 0.5) * self.screen_width_mm;
        let mut y = (0.5 - nose.y) * self.screen_height_mm;
        let z = self.estimate_depth(frame);

        x *= self.sensitivity.x;
        y *= self.sensitivity.y;
        // Z sensitivity scales only the deviation from the default distance:
        // 1.0 is an exact no-op, 0.0 pins depth at the default
        let z = (z - self.default_distance_mm)
            .mul_add(self.sensitivity.z, self.default_distance_mm);

        Ok(Some(self.filter.filter(Point3::new(x, y, z), timestamp)))
    }

    /// Depth in millimetres for the current frame, falling back to the
    /// default viewing distance when no trustworthy iris signal exists
    fn estimate_depth(&self, frame: &[Landmark]) -> f64 {
        if !self.use_iris_depth {
            return self.default_distance_mm;
        }
        let Some(focal_length_px) = self.focal_length_px else {
            return self.default_distance_mm;
        };

        let width_px = iris_width_px(frame, self.video_width_px);
        if width_px < MIN_IRIS_WIDTH_PX {
            log::debug!(
                "Iris width {width_px:.1}px below trust threshold, using default distance"
            );
            return self.default_distance_mm;
        }

        // Pinhole relation: distance = f * real_size / pixel_size
        focal_length_px * IRIS_DIAMETER_MM / width_px
    }

    /// Calibrate the camera focal length against a known viewing distance.
    ///
    /// The viewer sits at `known_distance_mm` from the camera; the measured
    /// iris width then pins down the focal length through the same pinhole
    /// relation the depth estimate uses. On success the focal length is
    /// stored and iris depth estimation is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientIrisSignal`] when the iris is too small
    /// in the image to trust; no state changes in that case. Returns
    /// [`Error::InvalidInput`] for a malformed frame or non-positive
    /// distance.
    pub fn calibrate(&mut self, landmarks: &[Landmark], known_distance_mm: f64) -> Result<f64> {
        validate_frame(landmarks)?;
        if known_distance_mm <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "Calibration distance must be positive, got {known_distance_mm}"
            )));
        }

        let width_px = iris_width_px(landmarks, self.video_width_px);
        if width_px < MIN_IRIS_WIDTH_PX {
            return Err(Error::InsufficientIrisSignal {
                width_px,
                min_px: MIN_IRIS_WIDTH_PX,
            });
        }

        let focal_length_px = width_px * known_distance_mm / IRIS_DIAMETER_MM;
        log::info!(
            "Calibrated focal length: {focal_length_px:.1}px (iris {width_px:.1}px at {known_distance_mm:.0}mm)"
        );
        self.focal_length_px = Some(focal_length_px);
        self.use_iris_depth = true;

        Ok(focal_length_px)
    }

    /// Whether the last `estimate` call saw a subject
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Calibrated or configured focal length, if any
    #[must_use]
    pub fn focal_length_px(&self) -> Option<f64> {
        self.focal_length_px
    }

    /// Clear all smoothing state and the tracking flag. Idempotent; safe to
    /// call whenever the upstream tracker is suspended or restarted.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.tracking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_FACE_LANDMARKS;

    fn centered_frame() -> Vec<Landmark> {
        vec![Landmark::new(0.5, 0.5, 0.0); NUM_FACE_LANDMARKS]
    }

    #[test]
    fn test_centered_nose_maps_to_screen_center() {
        let mut estimator = HeadPoseEstimator::new(&Config::default());
        let eye = estimator
            .estimate(Some(&centered_frame()), 0.0)
            .unwrap()
            .unwrap();
        assert!(eye.x.abs() < 1e-9);
        assert!(eye.y.abs() < 1e-9);
        assert!((eye.z - Config::default().screen.default_distance_mm).abs() < 1e-9);
    }

    #[test]
    fn test_nose_offset_maps_in_millimetres_with_y_flip() {
        let config = Config::default();
        let mut estimator = HeadPoseEstimator::new(&config);

        let mut frame = centered_frame();
        frame[crate::constants::NOSE_TIP_INDEX] = Landmark::new(0.75, 0.25, 0.0);

        let eye = estimator.estimate(Some(&frame), 0.0).unwrap().unwrap();
        assert!((eye.x - 0.25 * config.screen.width_mm).abs() < 1e-9);
        assert!((eye.y - 0.25 * config.screen.height_mm).abs() < 1e-9);
    }

    #[test]
    fn test_no_landmarks_returns_none() {
        let mut estimator = HeadPoseEstimator::new(&Config::default());
        assert!(estimator.estimate(None, 0.0).unwrap().is_none());
        assert!(estimator.estimate(Some(&[]), 0.1).unwrap().is_none());
        assert!(!estimator.is_tracking());
    }

    #[test]
    fn test_truncated_frame_is_contract_violation() {
        let mut estimator = HeadPoseEstimator::new(&Config::default());
        let short = vec![Landmark::new(0.5, 0.5, 0.0); 10];
        assert!(matches!(
            estimator.estimate(Some(&short), 0.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_z_sensitivity_pins_default_distance() {
        let mut config = Config::default();
        config.tracking.sensitivity_z = 0.0;
        config.tracking.use_iris_depth = true;
        config.tracking.focal_length_px = Some(1000.0);
        let mut estimator = HeadPoseEstimator::new(&config);

        let eye = estimator
            .estimate(Some(&centered_frame()), 0.0)
            .unwrap()
            .unwrap();
        assert!((eye.z - config.screen.default_distance_mm).abs() < 1e-9);
    }

    #[test]
    fn test_calibrate_rejects_tiny_iris() {
        let mut estimator = HeadPoseEstimator::new(&Config::default());
        // All landmarks coincide: measured iris width is zero
        let err = estimator.calibrate(&centered_frame(), 600.0).unwrap_err();
        assert!(matches!(err, Error::InsufficientIrisSignal { .. }));
        assert!(estimator.focal_length_px().is_none());
    }

    #[test]
    fn test_calibrate_rejects_non_positive_distance() {
        let mut estimator = HeadPoseEstimator::new(&Config::default());
        assert!(matches!(
            estimator.calibrate(&centered_frame(), 0.0),
            Err(Error::InvalidInput(_))
        ));
    }
}
