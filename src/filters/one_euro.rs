use std::f64::consts::PI;

/// Speed-adaptive low-pass filter for a single scalar signal (One-Euro).
///
/// A plain exponential filter either over-smooths fast motion or
/// under-smooths noise at rest. Here the cutoff frequency grows with the
/// estimated signal speed, so the filter is aggressive when the input is
/// still and nearly transparent when it moves fast.
pub struct OneEuroFilter {
    min_cutoff: f64,
    beta: f64,
    d_cutoff: f64,

    // State: previous filtered value, previous filtered derivative and
    // the timestamp they were produced at. None until the first sample.
    x_prev: Option<f64>,
    dx_prev: f64,
    t_prev: f64,
}

impl OneEuroFilter {
    /// Create a new filter.
    ///
    /// * `min_cutoff` - cutoff frequency in Hz at rest (lower = smoother)
    /// * `beta` - speed coefficient (higher = less lag during fast motion)
    /// * `d_cutoff` - cutoff in Hz for smoothing the derivative estimate
    ///
    /// # Panics
    ///
    /// Panics if any parameter is not positive
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, d_cutoff: f64) -> Self {
        assert!(min_cutoff > 0.0, "Minimum cutoff frequency must be positive");
        assert!(beta > 0.0, "Beta must be positive");
        assert!(d_cutoff > 0.0, "Derivative cutoff frequency must be positive");
        Self {
            min_cutoff,
            beta,
            d_cutoff,
            x_prev: None,
            dx_prev: 0.0,
            t_prev: 0.0,
        }
    }

    /// Smoothing coefficient for a given cutoff frequency and time step
    fn alpha(cutoff: f64, dt: f64) -> f64 {
        let tau = 1.0 / (2.0 * PI * cutoff);
        1.0 / (1.0 + tau / dt)
    }

    /// Filter one sample taken at timestamp `t` (seconds).
    ///
    /// The first sample after construction or [`reset`](Self::reset) passes
    /// through unchanged. Non-increasing timestamps return the previous
    /// output without touching state.
    pub fn filter(&mut self, x: f64, t: f64) -> f64 {
        let Some(x_prev) = self.x_prev else {
            self.x_prev = Some(x);
            self.dx_prev = 0.0;
            self.t_prev = t;
            return x;
        };

        let dt = t - self.t_prev;
        if dt <= 0.0 {
            return x_prev;
        }

        // Smoothed derivative estimate
        let dx = (x - x_prev) / dt;
        let a_d = Self::alpha(self.d_cutoff, dt);
        let dx_hat = a_d * dx + (1.0 - a_d) * self.dx_prev;

        // Cutoff rises with speed, reducing smoothing during motion
        let cutoff = self.beta.mul_add(dx_hat.abs(), self.min_cutoff);
        let a = Self::alpha(cutoff, dt);
        let x_hat = a * x + (1.0 - a) * x_prev;

        self.x_prev = Some(x_hat);
        self.dx_prev = dx_hat;
        self.t_prev = t;

        x_hat
    }

    /// Clear all state, as if the filter had never seen a sample.
    ///
    /// Must be called when the input stream resumes after a gap; otherwise
    /// the first post-gap sample reads as a huge velocity spike.
    pub fn reset(&mut self) {
        self.x_prev = None;
        self.dx_prev = 0.0;
        self.t_prev = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_identity() {
        let mut filter = OneEuroFilter::new(1.0, 0.02, 1.0);
        assert_eq!(filter.filter(42.5, 0.0), 42.5);
    }

    #[test]
    fn test_first_call_identity_after_reset() {
        let mut filter = OneEuroFilter::new(1.0, 0.02, 1.0);
        filter.filter(10.0, 0.0);
        filter.filter(20.0, 0.033);
        filter.reset();
        assert_eq!(filter.filter(-3.0, 5.0), -3.0);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut filter = OneEuroFilter::new(1.0, 0.02, 1.0);
        filter.filter(0.0, 0.0);

        let mut out = 0.0;
        for i in 1..300 {
            out = filter.filter(100.0, f64::from(i) / 30.0);
        }
        assert!((out - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_monotonic_timestamp_returns_previous() {
        let mut filter = OneEuroFilter::new(1.0, 0.02, 1.0);
        filter.filter(10.0, 0.0);
        let smoothed = filter.filter(12.0, 0.033);

        // Duplicate and backwards timestamps must not advance the filter
        assert_eq!(filter.filter(99.0, 0.033), smoothed);
        assert_eq!(filter.filter(99.0, 0.01), smoothed);
    }

    #[test]
    fn test_fast_motion_tracks_closer_than_slow_settings() {
        // Same step input, higher beta should land closer to the target
        let mut sluggish = OneEuroFilter::new(1.0, 0.001, 1.0);
        let mut responsive = OneEuroFilter::new(1.0, 10.0, 1.0);

        sluggish.filter(0.0, 0.0);
        responsive.filter(0.0, 0.0);
        let a = sluggish.filter(50.0, 0.033);
        let b = responsive.filter(50.0, 0.033);

        assert!(b > a);
        assert!(b <= 50.0);
    }

    #[test]
    #[should_panic(expected = "Minimum cutoff frequency must be positive")]
    fn test_zero_min_cutoff() {
        let _ = OneEuroFilter::new(0.0, 0.02, 1.0);
    }

    #[test]
    #[should_panic(expected = "Beta must be positive")]
    fn test_zero_beta() {
        let _ = OneEuroFilter::new(1.0, 0.0, 1.0);
    }
}
