//! Configuration management for the head-coupled projection pipeline

use crate::{
    constants::{
        DEFAULT_BETA, DEFAULT_DEAD_ZONE_MM, DEFAULT_DERIVATIVE_CUTOFF_HZ, DEFAULT_FAR_MM,
        DEFAULT_MIN_CUTOFF_HZ, DEFAULT_NEAR_MM, DEFAULT_VIDEO_HEIGHT_PX, DEFAULT_VIDEO_WIDTH_PX,
        DEFAULT_VIEWING_DISTANCE_MM,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Physical screen geometry and clip planes
    pub screen: ScreenConfig,

    /// Video capture resolution the landmarks were produced at
    pub video: VideoConfig,

    /// Tracking sensitivity and depth estimation
    pub tracking: TrackingConfig,

    /// Smoothing filter parameters
    pub smoothing: SmoothingConfig,
}

/// Physical screen geometry, millimetres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Display width in millimetres
    pub width_mm: f64,

    /// Display height in millimetres
    pub height_mm: f64,

    /// Near clip plane in millimetres
    pub near_mm: f64,

    /// Far clip plane in millimetres
    pub far_mm: f64,

    /// Assumed viewing distance when no depth signal is available
    pub default_distance_mm: f64,
}

/// Video capture resolution, pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Capture width in pixels
    pub width_px: f64,

    /// Capture height in pixels
    pub height_px: f64,
}

/// Tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Horizontal sensitivity multiplier
    pub sensitivity_x: f64,

    /// Vertical sensitivity multiplier
    pub sensitivity_y: f64,

    /// Depth sensitivity multiplier (scales deviation from the default
    /// distance; 1.0 is a no-op, 0.0 pins depth at the default)
    pub sensitivity_z: f64,

    /// Estimate depth from the apparent iris size
    pub use_iris_depth: bool,

    /// Calibrated camera focal length in pixels; required for iris depth
    pub focal_length_px: Option<f64>,
}

/// Smoothing filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// One-Euro cutoff frequency at rest, Hz
    pub min_cutoff_hz: f64,

    /// One-Euro speed coefficient
    pub beta: f64,

    /// One-Euro derivative cutoff frequency, Hz
    pub d_cutoff_hz: f64,

    /// Dead-zone radius in millimetres
    pub dead_zone_mm: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            video: VideoConfig::default(),
            tracking: TrackingConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            // 15.6" 16:9 laptop panel
            width_mm: 344.0,
            height_mm: 215.0,
            near_mm: DEFAULT_NEAR_MM,
            far_mm: DEFAULT_FAR_MM,
            default_distance_mm: DEFAULT_VIEWING_DISTANCE_MM,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_VIDEO_WIDTH_PX,
            height_px: DEFAULT_VIDEO_HEIGHT_PX,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sensitivity_x: 1.0,
            sensitivity_y: 1.0,
            sensitivity_z: 1.0,
            use_iris_depth: false,
            focal_length_px: None,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            min_cutoff_hz: DEFAULT_MIN_CUTOFF_HZ,
            beta: DEFAULT_BETA,
            d_cutoff_hz: DEFAULT_DERIVATIVE_CUTOFF_HZ,
            dead_zone_mm: DEFAULT_DEAD_ZONE_MM,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Build a head pose estimator from this configuration
    ///
    /// # Errors
    ///
    /// Returns a [`Error::ConfigError`] when validation fails
    pub fn create_estimator(&self) -> Result<crate::head_pose::HeadPoseEstimator> {
        self.validate()?;
        Ok(crate::head_pose::HeadPoseEstimator::new(self))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.screen.width_mm <= 0.0 || self.screen.height_mm <= 0.0 {
            return Err(Error::ConfigError(
                "Screen dimensions must be positive".to_string(),
            ));
        }
        if self.screen.near_mm <= 0.0 {
            return Err(Error::ConfigError("Near plane must be positive".to_string()));
        }
        if self.screen.far_mm <= self.screen.near_mm {
            return Err(Error::ConfigError(
                "Far plane must be beyond the near plane".to_string(),
            ));
        }
        if self.screen.default_distance_mm <= 0.0 {
            return Err(Error::ConfigError(
                "Default viewing distance must be positive".to_string(),
            ));
        }

        if self.video.width_px <= 0.0 || self.video.height_px <= 0.0 {
            return Err(Error::ConfigError(
                "Video resolution must be positive".to_string(),
            ));
        }

        if let Some(f) = self.tracking.focal_length_px {
            if f <= 0.0 {
                return Err(Error::ConfigError("Focal length must be positive".to_string()));
            }
        }
        if self.tracking.use_iris_depth && self.tracking.focal_length_px.is_none() {
            log::warn!("Iris depth enabled without a focal length; depth will use the default distance until calibration");
        }

        if self.smoothing.min_cutoff_hz <= 0.0
            || self.smoothing.beta <= 0.0
            || self.smoothing.d_cutoff_hz <= 0.0
        {
            return Err(Error::ConfigError(
                "Smoothing filter parameters must be positive".to_string(),
            ));
        }
        if self.smoothing.dead_zone_mm < 0.0 {
            return Err(Error::ConfigError(
                "Dead zone must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head-coupled projection configuration

# Physical screen geometry (millimetres)
screen:
  width_mm: 344.0
  height_mm: 215.0
  near_mm: 1.0
  far_mm: 10000.0
  default_distance_mm: 600.0

# Video capture resolution the landmarks were produced at (pixels)
video:
  width_px: 1280.0
  height_px: 720.0

# Tracking
tracking:
  sensitivity_x: 1.0
  sensitivity_y: 1.0
  sensitivity_z: 1.0
  use_iris_depth: false
  focal_length_px: null

# Smoothing (One-Euro per axis + dead zone)
smoothing:
  min_cutoff_hz: 1.0
  beta: 0.02
  d_cutoff_hz: 1.0
  dead_zone_mm: 2.0
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let parsed: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(parsed.validate().is_ok());
        assert!((parsed.screen.width_mm - 344.0).abs() < 1e-9);
        assert!(!parsed.tracking.use_iris_depth);
        assert!(parsed.tracking.focal_length_px.is_none());
    }

    #[test]
    fn test_rejects_inverted_clip_planes() {
        let mut config = Config::default();
        config.screen.near_mm = 100.0;
        config.screen.far_mm = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_dead_zone() {
        let mut config = Config::default();
        config.smoothing.dead_zone_mm = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_estimator_validates_first() {
        let mut config = Config::default();
        config.screen.width_mm = 0.0;
        assert!(config.create_estimator().is_err());
        assert!(Config::default().create_estimator().is_ok());
    }
}
