//! Tuning knobs for selection cadence, debounce, and motion smoothing
//!
//! All intervals are in seconds. The defaults reproduce the shipped
//! behaviour: selection every 0.1s, guard sweep every 0.5s, and a 0.5s
//! grace period before content hides after its marker is lost.

use serde::Deserialize;

use crate::error::{FiducialError, Result};
use crate::tracking::VisibilityPolicy;

/// Pose interpolation settings
///
/// Instances ease toward the latest observed pose at `lerp_rate` per
/// second. Deltas below both epsilons are treated as "arrived" so a
/// stationary marker does not jitter from sensor noise.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Exponential approach rate (per second)
    pub lerp_rate: f32,
    /// Positional deadband in meters
    pub position_epsilon: f32,
    /// Angular deadband in radians
    pub rotation_epsilon: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            lerp_rate: 8.0,
            position_epsilon: 1e-3,
            rotation_epsilon: 0.5_f32.to_radians(),
        }
    }
}

/// Top-level tracking and content lifecycle configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Period of the marker selection tick in seconds
    pub select_interval: f64,
    /// Period of the lifecycle guard tick in seconds
    pub guard_interval: f64,
    /// Grace period before content hides once its marker stops tracking
    pub hide_delay: f64,
    /// Uniform scale applied to spawned content
    pub content_scale: f32,
    /// Content sits this far above the marker plane, in meters
    pub vertical_offset: f32,
    /// Pose smoothing parameters
    pub motion: MotionConfig,
    /// Which tracking states refresh marker recency
    pub visibility: VisibilityPolicy,
    /// Startup probes for the tracking backend before degrading
    pub max_backend_retries: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            select_interval: 0.1,
            guard_interval: 0.5,
            hide_delay: 0.5,
            content_scale: 1.0,
            vertical_offset: 0.05,
            motion: MotionConfig::default(),
            visibility: VisibilityPolicy::default(),
            max_backend_retries: 5,
        }
    }
}

impl TrackingConfig {
    /// Validates interval and smoothing parameters
    ///
    /// Zero or negative tick periods would spin the scheduler; a
    /// non-positive lerp rate would freeze every instance in place.
    pub fn validate(&self) -> Result<()> {
        if self.select_interval <= 0.0 {
            return Err(FiducialError::ConfigError(format!(
                "select_interval must be positive, got {}",
                self.select_interval
            )));
        }
        if self.guard_interval <= 0.0 {
            return Err(FiducialError::ConfigError(format!(
                "guard_interval must be positive, got {}",
                self.guard_interval
            )));
        }
        if self.hide_delay < 0.0 {
            return Err(FiducialError::ConfigError(format!(
                "hide_delay must not be negative, got {}",
                self.hide_delay
            )));
        }
        if self.content_scale <= 0.0 {
            return Err(FiducialError::ConfigError(format!(
                "content_scale must be positive, got {}",
                self.content_scale
            )));
        }
        if self.motion.lerp_rate <= 0.0 {
            return Err(FiducialError::ConfigError(format!(
                "motion.lerp_rate must be positive, got {}",
                self.motion.lerp_rate
            )));
        }
        if self.motion.position_epsilon < 0.0 || self.motion.rotation_epsilon < 0.0 {
            return Err(FiducialError::ConfigError(
                "motion epsilons must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
