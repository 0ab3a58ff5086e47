//! Constants used throughout the head tracking pipeline

/// Number of landmarks produced by the face landmarker per frame
pub const NUM_FACE_LANDMARKS: usize = 478;

/// Landmark index of the nose tip
pub const NOSE_TIP_INDEX: usize = 1;

/// Iris boundary landmark indices, horizontal extremes per eye.
/// Left eye: outer 469, inner 471. Right eye: inner 474, outer 476.
pub const LEFT_IRIS_OUTER_INDEX: usize = 469;
pub const LEFT_IRIS_INNER_INDEX: usize = 471;
pub const RIGHT_IRIS_INNER_INDEX: usize = 474;
pub const RIGHT_IRIS_OUTER_INDEX: usize = 476;

/// Human iris diameter in millimetres (biological average, near-constant
/// across adults), used by the pinhole depth estimate
pub const IRIS_DIAMETER_MM: f64 = 11.7;

/// Minimum iris width in pixels below which a depth sample is not trusted
pub const MIN_IRIS_WIDTH_PX: f64 = 5.0;

/// Default viewing distance in millimetres when no depth signal is available
pub const DEFAULT_VIEWING_DISTANCE_MM: f64 = 600.0;

/// Smallest eye-to-screen distance the projection solver will accept (mm);
/// a non-positive distance is replaced by this before computing extents
pub const MIN_EYE_DISTANCE_MM: f64 = 1.0;

/// Default One-Euro filter parameters
pub const DEFAULT_MIN_CUTOFF_HZ: f64 = 1.0;
pub const DEFAULT_BETA: f64 = 0.02;
pub const DEFAULT_DERIVATIVE_CUTOFF_HZ: f64 = 1.0;

/// Default dead-zone radius in millimetres for the point filter
pub const DEFAULT_DEAD_ZONE_MM: f64 = 2.0;

/// Default clip planes in millimetres
pub const DEFAULT_NEAR_MM: f64 = 1.0;
pub const DEFAULT_FAR_MM: f64 = 10_000.0;

/// Default video capture resolution in pixels
pub const DEFAULT_VIDEO_WIDTH_PX: f64 = 1280.0;
pub const DEFAULT_VIDEO_HEIGHT_PX: f64 = 720.0;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
