//! Landmark input contract and iris measurement.
//!
//! The external tracker delivers 478 normalized face landmarks per frame
//! (MediaPipe FaceLandmarker layout, iris refinement enabled). Only a small
//! fixed subset is consulted: the nose tip for lateral position and the four
//! horizontal iris-boundary points for depth.

use crate::{
    constants::{
        LEFT_IRIS_INNER_INDEX, LEFT_IRIS_OUTER_INDEX, NOSE_TIP_INDEX, NUM_FACE_LANDMARKS,
        RIGHT_IRIS_INNER_INDEX, RIGHT_IRIS_OUTER_INDEX,
    },
    Error, Result,
};

/// One normalized face landmark.
///
/// `x` and `y` are in [0, 1] across the video frame (`y` grows downward);
/// `z` is a small relative depth the tracker estimates around the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Validate that a frame carries the full landmark set.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the count is not exactly the
/// landmarker's 478 — a tracker contract violation, distinct from the
/// "no subject detected" case which is an empty/absent frame.
pub fn validate_frame(landmarks: &[Landmark]) -> Result<()> {
    if landmarks.len() != NUM_FACE_LANDMARKS {
        return Err(Error::InvalidInput(format!(
            "Expected {} landmarks, got {}",
            NUM_FACE_LANDMARKS,
            landmarks.len()
        )));
    }
    Ok(())
}

/// Nose tip landmark of a validated frame
#[must_use]
pub fn nose_tip(landmarks: &[Landmark]) -> Landmark {
    landmarks[NOSE_TIP_INDEX]
}

/// Measure the iris width in pixels, averaged across both eyes.
///
/// Each eye contributes the horizontal distance between its inner and outer
/// iris-boundary landmarks, scaled from normalized coordinates to pixels by
/// the video width.
#[must_use]
pub fn iris_width_px(landmarks: &[Landmark], video_width_px: f64) -> f64 {
    let left =
        (landmarks[LEFT_IRIS_OUTER_INDEX].x - landmarks[LEFT_IRIS_INNER_INDEX].x).abs();
    let right =
        (landmarks[RIGHT_IRIS_OUTER_INDEX].x - landmarks[RIGHT_IRIS_INNER_INDEX].x).abs();
    (left + right) / 2.0 * video_width_px
}
