use nalgebra::Point3;

use super::one_euro::OneEuroFilter;

/// Smooths a stream of 3D points with one [`OneEuroFilter`] per axis plus a
/// dead zone on the output.
///
/// The per-axis filters remove most of the jitter; the dead zone suppresses
/// the sub-millimetre residue that would otherwise show up as a slowly
/// crawling camera when the viewer sits still.
pub struct PointFilter {
    x: OneEuroFilter,
    y: OneEuroFilter,
    z: OneEuroFilter,
    dead_zone_mm: f64,
    // Last point actually emitted (post dead zone), None until first sample
    last_emitted: Option<Point3<f64>>,
}

impl PointFilter {
    /// Create a point filter with identical One-Euro parameters on each axis
    /// and a dead-zone radius in millimetres.
    ///
    /// # Panics
    ///
    /// Panics if the filter parameters are not positive or the dead zone is
    /// negative
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, d_cutoff: f64, dead_zone_mm: f64) -> Self {
        assert!(dead_zone_mm >= 0.0, "Dead zone must be non-negative");
        Self {
            x: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
            y: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
            z: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
            dead_zone_mm,
            last_emitted: None,
        }
    }

    /// Filter one point sampled at timestamp `t` (seconds).
    pub fn filter(&mut self, point: Point3<f64>, t: f64) -> Point3<f64> {
        let filtered = Point3::new(
            self.x.filter(point.x, t),
            self.y.filter(point.y, t),
            self.z.filter(point.z, t),
        );

        match self.last_emitted {
            Some(last) if (filtered - last).norm() < self.dead_zone_mm => last,
            _ => {
                self.last_emitted = Some(filtered);
                filtered
            }
        }
    }

    /// Clear all three axis filters and the remembered output point.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
        self.last_emitted = None;
    }
}
