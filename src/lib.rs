//! Head-coupled off-axis projection for "fish-tank VR" displays.
//!
//! Each rendered frame, this library turns a tracked viewer-eye position
//! into an asymmetric ("off-axis") viewing frustum and camera pose, so a
//! flat display behaves as a window into a 3D scene. The pipeline:
//!
//! 1. An external tracker delivers 478 normalized face landmarks per frame
//!    (or none, when no subject is visible).
//! 2. [`head_pose::HeadPoseEstimator`] converts the landmarks into a
//!    physical eye position in millimetres, estimating depth from the
//!    apparent iris size when a calibrated focal length is available, and
//!    smooths the result with per-axis One-Euro filters plus a dead zone.
//! 3. [`projection`] solves the asymmetric frustum for the physical screen
//!    rectangle from that eye position.
//! 4. [`camera::CameraController`] writes the projection and a look-at pose
//!    into any camera implementing [`camera::RenderCamera`].
//!
//! Webcam capture, landmark inference, and rendering itself are external
//! collaborators; the library is pure math over their outputs and never
//! blocks.
//!
//! # Example
//!
//! ```
//! use fishtank_vr::camera::{CameraController, PerspectiveCamera};
//! use fishtank_vr::config::Config;
//! use fishtank_vr::landmarks::Landmark;
//! use fishtank_vr::projection::ScreenGeometry;
//!
//! # fn main() -> fishtank_vr::Result<()> {
//! let config = Config::default();
//! let mut estimator = config.create_estimator()?;
//! let mut controller = CameraController::new(
//!     PerspectiveCamera::new(),
//!     ScreenGeometry::new(config.screen.width_mm, config.screen.height_mm),
//!     config.screen.near_mm,
//!     config.screen.far_mm,
//!     config.screen.default_distance_mm,
//! );
//!
//! // Per render tick: feed the most recent landmark frame, if any
//! let frame: Vec<Landmark> =
//!     vec![Landmark::new(0.5, 0.5, 0.0); fishtank_vr::constants::NUM_FACE_LANDMARKS];
//! if let Some(eye) = estimator.estimate(Some(&frame), 0.0)? {
//!     controller.update_from_head_position(eye);
//! }
//!
//! let frustum = controller.frustum();
//! assert!(frustum.left < frustum.right);
//! # Ok(())
//! # }
//! ```

/// Camera trait and update controller
pub mod camera;

/// Configuration management
pub mod config;

/// Constants used throughout the pipeline
pub mod constants;

/// Error types
pub mod error;

/// Signal filtering for smoothing tracked positions
pub mod filters;

/// Head pose estimation from landmark frames
pub mod head_pose;

/// Landmark input contract and iris measurement
pub mod landmarks;

/// Off-axis projection solver
pub mod projection;

pub use error::{Error, Result};
