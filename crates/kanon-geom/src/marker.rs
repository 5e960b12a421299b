use serde::{Deserialize, Serialize};

use kanon_core::ToleranceConfig;

/// How a measured angle is drawn: a square right-angle marker or a
/// generic swept arc. The underlying measured value is the same either
/// way — this is purely a rendering choice, recomputed on every query
/// so it tracks moving lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngleMarker {
    /// Near-quarter-turn angle, drawn as the classical square marker.
    Right,
    /// Any other angle, drawn as a swept arc of the given winding.
    Arc { radians: f64 },
}

impl AngleMarker {
    /// Classify a winding in [0, 2π). An angle within
    /// `tol.right_angle` of an odd multiple of π/2 (a quarter turn in
    /// either winding) classifies as `Right`, unless the caller has
    /// disabled that with `allow_right = false`.
    pub fn classify(radians: f64, tol: &ToleranceConfig, allow_right: bool) -> Self {
        if allow_right {
            let quarter = std::f64::consts::FRAC_PI_2;
            let k = (radians / quarter).round();
            if k as i64 % 2 != 0 && (radians - k * quarter).abs() < tol.right_angle {
                return AngleMarker::Right;
            }
        }
        AngleMarker::Arc { radians }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, AngleMarker::Right)
    }
}
