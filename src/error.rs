//! Error types for the head tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Iris landmarks too small/unreliable to calibrate focal length
    #[error("Insufficient iris signal: measured width {width_px:.1}px is below the trust threshold of {min_px:.1}px")]
    InsufficientIrisSignal {
        /// Measured iris width in pixels
        width_px: f64,
        /// Minimum trustworthy iris width in pixels
        min_px: f64,
    },

    /// Invalid input parameters provided (caller contract violation)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
