//! Off-axis projection solver.
//!
//! Pure geometry: given the viewer's eye position in millimetres and the
//! physical screen rectangle, compute the asymmetric ("off-axis") frustum
//! that makes the display behave as a window into the scene. A centered eye
//! degenerates to the ordinary symmetric perspective case.
//!
//! Two variants are provided: the axis-aligned fast path for a screen lying
//! in the z=0 plane, and a generalized form for arbitrarily oriented screens
//! given by three physical corner positions (after Kooima, "Generalized
//! Perspective Projection").

use nalgebra::{Matrix4, Point3, Vector3};

use crate::constants::MIN_EYE_DISTANCE_MM;

/// Physical size of the display, millimetres.
///
/// The screen rectangle lies in the z=0 plane, centered at the world origin,
/// with +X right and +Y up as seen by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl ScreenGeometry {
    /// # Panics
    ///
    /// Panics if either dimension is not positive
    #[must_use]
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        assert!(width_mm > 0.0, "Screen width must be positive");
        assert!(height_mm > 0.0, "Screen height must be positive");
        Self { width_mm, height_mm }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width_mm / 2.0
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height_mm / 2.0
    }
}

/// Near-plane extents of an asymmetric perspective frustum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumParameters {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl FrustumParameters {
    /// Perspective projection matrix for these extents (glFrustum layout,
    /// right-handed, looking down -Z, depth mapped to [-1, 1]).
    #[must_use]
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let Self {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;

        Matrix4::new(
            2.0 * n / (r - l), 0.0, (r + l) / (r - l), 0.0,
            0.0, 2.0 * n / (t - b), (t + b) / (t - b), 0.0,
            0.0, 0.0, -(f + n) / (f - n), -2.0 * f * n / (f - n),
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

/// Compute the asymmetric frustum for a screen in the z=0 plane.
///
/// The near-plane extents are the screen edges, as seen from the eye,
/// projected onto the near plane: `k = near / d` with `d` the perpendicular
/// eye-to-screen distance.
///
/// An eye at or behind the screen plane (`d <= 0`) would invert the frustum;
/// that case is recomputed with the same lateral position but the minimum
/// positive distance, keeping the output finite and forward-facing.
///
/// # Panics
///
/// Panics if the clip planes do not satisfy `0 < near < far`
#[must_use]
pub fn compute_frustum(
    eye: Point3<f64>,
    screen: ScreenGeometry,
    near: f64,
    far: f64,
) -> FrustumParameters {
    assert!(near > 0.0, "Near plane must be positive");
    assert!(far > near, "Far plane must be beyond the near plane");

    let d = if eye.z > 0.0 { eye.z } else { MIN_EYE_DISTANCE_MM };
    let k = near / d;

    FrustumParameters {
        left: (-screen.half_width() - eye.x) * k,
        right: (screen.half_width() - eye.x) * k,
        bottom: (-screen.half_height() - eye.y) * k,
        top: (screen.half_height() - eye.y) * k,
        near,
        far,
    }
}

/// Frustum plus view transform for an arbitrarily oriented screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedProjection {
    pub frustum: FrustumParameters,
    /// Rotates world space into the screen-aligned basis and translates the
    /// eye to the origin; rendering proceeds in eye space with the screen
    /// plane at a fixed depth.
    pub view: Matrix4<f64>,
}

/// Compute frustum and view transform for a screen given by three physical
/// corner positions (lower-left, lower-right, upper-left), millimetres.
///
/// Builds the screen's orthonormal right/up/normal basis from the corners
/// and projects the eye-to-corner vectors onto it; the extents reduce to the
/// axis-aligned formulas when the basis coincides with the world axes. The
/// same non-positive-distance guard applies: the eye is nudged along the
/// screen normal to the minimum valid distance and the extents recomputed
/// once.
///
/// # Panics
///
/// Panics if the clip planes do not satisfy `0 < near < far`, or if the
/// corners are colinear (no screen plane)
#[must_use]
pub fn compute_generalized_projection(
    eye: Point3<f64>,
    lower_left: Point3<f64>,
    lower_right: Point3<f64>,
    upper_left: Point3<f64>,
    near: f64,
    far: f64,
) -> GeneralizedProjection {
    assert!(near > 0.0, "Near plane must be positive");
    assert!(far > near, "Far plane must be beyond the near plane");

    // Orthonormal screen basis from the corners
    let vr = (lower_right - lower_left).normalize();
    let vu = (upper_left - lower_left).normalize();
    let vn = vr.cross(&vu);
    assert!(vn.norm() > 1e-9, "Screen corners are colinear");
    let vn = vn.normalize();

    // Perpendicular eye-to-plane distance; positive with the eye in front
    let d = -(lower_left - eye).dot(&vn);

    // One-shot fallback, not recursion: the nudged distance is exactly the
    // minimum, so the second pass cannot degenerate again
    let eye = if d > 0.0 {
        eye
    } else {
        eye + vn * (MIN_EYE_DISTANCE_MM - d)
    };

    let va = lower_left - eye;
    let vb = lower_right - eye;
    let vc = upper_left - eye;
    let d = -va.dot(&vn);
    let k = near / d;

    let frustum = FrustumParameters {
        left: vr.dot(&va) * k,
        right: vr.dot(&vb) * k,
        bottom: vu.dot(&va) * k,
        top: vu.dot(&vc) * k,
        near,
        far,
    };

    GeneralizedProjection {
        frustum,
        view: screen_basis_view(eye, vr, vu, vn),
    }
}

/// View matrix rotating world space into the screen basis and moving the eye
/// to the origin
fn screen_basis_view(
    eye: Point3<f64>,
    vr: Vector3<f64>,
    vu: Vector3<f64>,
    vn: Vector3<f64>,
) -> Matrix4<f64> {
    let rotation = Matrix4::new(
        vr.x, vr.y, vr.z, 0.0,
        vu.x, vu.y, vu.z, 0.0,
        vn.x, vn.y, vn.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    rotation * Matrix4::new_translation(&-eye.coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(344.0, 215.0)
    }

    #[test]
    fn test_centered_eye_gives_symmetric_frustum() {
        for d in [100.0, 600.0, 2500.0] {
            let f = compute_frustum(Point3::new(0.0, 0.0, d), screen(), 1.0, 10_000.0);
            assert!((f.left + f.right).abs() < EPS, "asymmetric at d={d}");
            assert!((f.bottom + f.top).abs() < EPS, "asymmetric at d={d}");
        }
    }

    #[test]
    fn test_reference_frustum_at_600mm() {
        // 344x215mm screen, near 1, eye centered at 600mm: k = 1/600
        let f = compute_frustum(Point3::new(0.0, 0.0, 600.0), screen(), 1.0, 10_000.0);
        assert!((f.left - (-172.0 / 600.0)).abs() < EPS);
        assert!((f.right - (172.0 / 600.0)).abs() < EPS);
        assert!((f.bottom - (-107.5 / 600.0)).abs() < EPS);
        assert!((f.top - (107.5 / 600.0)).abs() < EPS);
    }

    #[test]
    fn test_off_center_eye_shifts_frustum() {
        let f = compute_frustum(Point3::new(50.0, 0.0, 600.0), screen(), 1.0, 10_000.0);
        // Eye moved right: both extents shift left, window stays the same width
        assert!(f.left < -f.right);
        assert!(((f.right - f.left) - 344.0 / 600.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_eye_matches_minimum_distance() {
        let at_plane = compute_frustum(Point3::new(5.0, 3.0, 0.0), screen(), 1.0, 10_000.0);
        let behind = compute_frustum(Point3::new(5.0, 3.0, -250.0), screen(), 1.0, 10_000.0);
        let nudged = compute_frustum(Point3::new(5.0, 3.0, 1.0), screen(), 1.0, 10_000.0);
        assert_eq!(at_plane, nudged);
        assert_eq!(behind, nudged);
        assert!(at_plane.left.is_finite() && at_plane.left < at_plane.right);
    }

    #[test]
    fn test_generalized_matches_axis_aligned_for_upright_screen() {
        let s = screen();
        let (hw, hh) = (s.half_width(), s.half_height());
        let eye = Point3::new(37.0, -12.0, 540.0);

        let aligned = compute_frustum(eye, s, 1.0, 10_000.0);
        let general = compute_generalized_projection(
            eye,
            Point3::new(-hw, -hh, 0.0),
            Point3::new(hw, -hh, 0.0),
            Point3::new(-hw, hh, 0.0),
            1.0,
            10_000.0,
        );

        assert!((general.frustum.left - aligned.left).abs() < EPS);
        assert!((general.frustum.right - aligned.right).abs() < EPS);
        assert!((general.frustum.bottom - aligned.bottom).abs() < EPS);
        assert!((general.frustum.top - aligned.top).abs() < EPS);
    }

    #[test]
    fn test_generalized_view_moves_eye_to_origin() {
        let s = screen();
        let (hw, hh) = (s.half_width(), s.half_height());
        let eye = Point3::new(25.0, 40.0, 700.0);

        let general = compute_generalized_projection(
            eye,
            Point3::new(-hw, -hh, 0.0),
            Point3::new(hw, -hh, 0.0),
            Point3::new(-hw, hh, 0.0),
            1.0,
            10_000.0,
        );

        let mapped = general.view.transform_point(&eye);
        assert!(mapped.coords.norm() < EPS);

        // For the upright screen the basis is the world basis, so the view
        // is a pure translation by the negated eye position
        let center = general.view.transform_point(&Point3::origin());
        assert!((center.x + 25.0).abs() < EPS);
        assert!((center.y + 40.0).abs() < EPS);
        assert!((center.z + 700.0).abs() < EPS);
    }

    #[test]
    fn test_generalized_tilted_screen_stays_finite_and_ordered() {
        // Screen leaned back 30 degrees around X
        let (sin, cos) = (30.0_f64.to_radians()).sin_cos();
        let hw = 172.0;
        let hh = 107.5;
        let general = compute_generalized_projection(
            Point3::new(0.0, 0.0, 600.0),
            Point3::new(-hw, -hh * cos, -hh * sin),
            Point3::new(hw, -hh * cos, -hh * sin),
            Point3::new(-hw, hh * cos, hh * sin),
            1.0,
            10_000.0,
        );

        let f = general.frustum;
        assert!(f.left < f.right);
        assert!(f.bottom < f.top);
        // Centered eye on a pure X-axis tilt keeps horizontal symmetry
        assert!((f.left + f.right).abs() < EPS);
    }

    #[test]
    fn test_projection_matrix_symmetric_case_matches_standard_form() {
        let f = compute_frustum(Point3::new(0.0, 0.0, 600.0), screen(), 1.0, 10_000.0);
        let m = f.projection_matrix();

        // Off-center terms vanish for the symmetric frustum
        assert!(m[(0, 2)].abs() < EPS);
        assert!(m[(1, 2)].abs() < EPS);
        assert!((m[(3, 2)] - (-1.0)).abs() < EPS);
        assert!((m[(0, 0)] - 600.0 / 172.0).abs() < EPS);
        assert!((m[(1, 1)] - 600.0 / 107.5).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "Near plane must be positive")]
    fn test_zero_near_plane() {
        let _ = compute_frustum(Point3::new(0.0, 0.0, 600.0), screen(), 0.0, 10_000.0);
    }

    #[test]
    #[should_panic(expected = "Far plane must be beyond the near plane")]
    fn test_far_before_near() {
        let _ = compute_frustum(Point3::new(0.0, 0.0, 600.0), screen(), 10.0, 5.0);
    }
}
