//! Camera update controller.
//!
//! Owns a perspective camera and rewrites its projection and world transform
//! from each new eye position. The camera itself is behind a small trait so
//! the core carries no rendering-library dependency; any renderer that can
//! accept a projection matrix and a camera pose can sit on the other side.

use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

use crate::{
    constants::MIN_EYE_DISTANCE_MM,
    head_pose::EyePosition,
    projection::{compute_frustum, FrustumParameters, ScreenGeometry},
};

/// A camera with a settable projection and world transform.
///
/// Implementations must take the given projection as-is. Recomputing it from
/// a field of view after the fact would silently replace the asymmetric
/// frustum with a symmetric one and break the window illusion.
pub trait RenderCamera {
    /// Replace the projection matrix
    fn set_projection(&mut self, projection: Matrix4<f64>);

    /// Replace the camera-to-world transform
    fn set_world_transform(&mut self, transform: Matrix4<f64>);
}

/// Plain matrix-backed camera, usable directly or as a reference
/// implementation of [`RenderCamera`].
///
/// Keeps the inverse projection cached for unprojection queries; the cache
/// is recomputed on every projection write.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    projection: Matrix4<f64>,
    inverse_projection: Matrix4<f64>,
    world_transform: Matrix4<f64>,
}

impl PerspectiveCamera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            projection: Matrix4::identity(),
            inverse_projection: Matrix4::identity(),
            world_transform: Matrix4::identity(),
        }
    }

    #[must_use]
    pub fn projection(&self) -> &Matrix4<f64> {
        &self.projection
    }

    #[must_use]
    pub fn inverse_projection(&self) -> &Matrix4<f64> {
        &self.inverse_projection
    }

    #[must_use]
    pub fn world_transform(&self) -> &Matrix4<f64> {
        &self.world_transform
    }

    /// View matrix (inverse of the camera-to-world transform)
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.world_transform
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderCamera for PerspectiveCamera {
    fn set_projection(&mut self, projection: Matrix4<f64>) {
        self.inverse_projection = projection.try_inverse().unwrap_or_else(Matrix4::identity);
        self.projection = projection;
    }

    fn set_world_transform(&mut self, transform: Matrix4<f64>) {
        self.world_transform = transform;
    }
}

/// Drives a [`RenderCamera`] from tracked eye positions.
///
/// On every update the off-axis frustum for the owned screen geometry is
/// written straight into the camera, and the camera is placed at the eye,
/// aimed at the perpendicular foot of the eye on the screen plane (same
/// X/Y, z=0) rather than at a fixed scene axis.
pub struct CameraController<C: RenderCamera> {
    camera: C,
    screen: ScreenGeometry,
    near: f64,
    far: f64,
    frustum: FrustumParameters,
}

impl<C: RenderCamera> CameraController<C> {
    /// Wrap a camera; performs an initial update with a centered eye at the
    /// given default viewing distance, so the camera is valid before the
    /// first tracked frame arrives.
    #[must_use]
    pub fn new(
        camera: C,
        screen: ScreenGeometry,
        near: f64,
        far: f64,
        default_distance_mm: f64,
    ) -> Self {
        let mut controller = Self {
            camera,
            screen,
            near,
            far,
            frustum: compute_frustum(
                Point3::new(0.0, 0.0, default_distance_mm),
                screen,
                near,
                far,
            ),
        };
        controller.update_from_head_position(Point3::new(0.0, 0.0, default_distance_mm));
        controller
    }

    /// Recompute projection and pose for a new eye position.
    ///
    /// An eye at or behind the screen plane is treated as sitting at the
    /// minimum valid distance, matching the projection solver's fallback, so
    /// pose and frustum never disagree.
    pub fn update_from_head_position(&mut self, eye: EyePosition) {
        let eye = Point3::new(eye.x, eye.y, eye.z.max(MIN_EYE_DISTANCE_MM));

        self.frustum = compute_frustum(eye, self.screen, self.near, self.far);
        self.camera.set_projection(self.frustum.projection_matrix());

        // Aim at the perpendicular foot of the eye on the screen plane
        let target = Point3::new(eye.x, eye.y, 0.0);
        let pose = Isometry3::look_at_rh(&eye, &target, &Vector3::y()).inverse();
        self.camera.set_world_transform(pose.to_homogeneous());
    }

    /// Frustum from the most recent update
    #[must_use]
    pub fn frustum(&self) -> FrustumParameters {
        self.frustum
    }

    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Release the owned camera
    pub fn into_camera(self) -> C {
        self.camera
    }
}
