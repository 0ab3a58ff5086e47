//! Signal filtering for smoothing tracked eye positions.
//!
//! Raw landmark-derived positions jitter by a few millimetres frame to
//! frame. The smoothing stack is a speed-adaptive One-Euro filter per axis
//! followed by a dead zone on the combined 3D output.

/// Speed-adaptive One-Euro filter for a single scalar signal
pub mod one_euro;

/// Per-axis smoothing plus dead zone for 3D point streams
pub mod point;

pub use one_euro::OneEuroFilter;
pub use point::PointFilter;
