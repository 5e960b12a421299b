use serde::{Deserialize, Serialize};

use crate::error::{KanonError, KanonResult};

/// Base linear tolerance for a coordinate system with unit scale.
pub const BASE_LINEAR_TOLERANCE: f64 = 1.0e-6;

/// Base angular tolerance in radians.
pub const BASE_ANGULAR_TOLERANCE: f64 = 1.0e-9;

/// Default half-width of the band around π/2 (and its multiples) inside
/// which an angle is classified as a right angle for marker selection.
pub const DEFAULT_RIGHT_ANGLE_TOLERANCE: f64 = 0.1;

/// Tolerances for geometric comparisons.
///
/// `linear` is a length scale tied to the active coordinate system, not an
/// absolute pixel value: two points closer than `linear` are the same
/// point, a 2x2 determinant smaller than `linear` means parallel lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// "Same point" distance.
    pub linear: f64,
    /// "Same angle" difference in radians.
    pub angular: f64,
    /// Half-width of the right-angle classification band in radians.
    pub right_angle: f64,
}

impl ToleranceConfig {
    /// Tolerances for a coordinate system whose typical lengths are ~1.
    pub fn unit() -> Self {
        Self::for_scale(1.0)
    }

    /// Tolerances scaled to a coordinate system whose typical lengths
    /// are `scale`.
    pub fn for_scale(scale: f64) -> Self {
        Self {
            linear: BASE_LINEAR_TOLERANCE * scale.abs().max(f64::MIN_POSITIVE),
            angular: BASE_ANGULAR_TOLERANCE,
            right_angle: DEFAULT_RIGHT_ANGLE_TOLERANCE,
        }
    }

    /// Override the right-angle classification band.
    pub fn with_right_angle(mut self, half_width: f64) -> Self {
        self.right_angle = half_width;
        self
    }

    /// Whether two positions coincide under this tolerance.
    pub fn same_point(&self, a: crate::Vec2, b: crate::Vec2) -> bool {
        a.distance_to(b) < self.linear
    }

    /// Whether a length is effectively zero under this tolerance.
    pub fn is_zero_length(&self, len: f64) -> bool {
        len.abs() < self.linear
    }

    pub fn load_from_file(path: &std::path::Path) -> KanonResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| KanonError::Config(e.to_string()))
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> KanonResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| KanonError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self::unit()
    }
}
