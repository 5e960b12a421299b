use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{KanonError, KanonResult};

/// A 2D vector / position in construction space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Dot product.
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product (signed parallelogram area).
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    /// Unit vector in the same direction. Fails on a ~zero-length vector.
    pub fn normalized(&self) -> KanonResult<Vec2> {
        let len = self.length();
        if len < f64::MIN_POSITIVE.sqrt() {
            return Err(KanonError::degenerate("cannot normalize zero vector"));
        }
        Ok(*self / len)
    }

    /// Counter-clockwise perpendicular (rotation by +90°).
    pub fn perp(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Rotate by `angle` radians counter-clockwise.
    pub fn rotated(&self, angle: f64) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Angle of inclination in radians, `atan2(y, x)`, in (-π, π].
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector at the given angle from the positive x axis.
    pub fn from_angle(angle: f64) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos, sin)
    }

    /// Linear interpolation between two positions.
    pub fn lerp(&self, other: Vec2, t: f64) -> Vec2 {
        *self + (other - *self) * t
    }

    pub fn midpoint(&self, other: Vec2) -> Vec2 {
        self.lerp(other, 0.5)
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Reduce an angle to the canonical range [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can yield exactly 2π for tiny negative inputs.
    if reduced >= std::f64::consts::TAU {
        0.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_vec2_dot_and_cross() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert!((a.dot(b)).abs() < 1e-12);
        assert!((a.cross(b) - 1.0).abs() < 1e-12);
        assert!((b.cross(a) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_length_and_distance() {
        let a = Vec2::new(3.0, 4.0);
        assert!((a.length() - 5.0).abs() < 1e-12);
        assert!((Vec2::zero().distance_to(a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_normalized() {
        let n = Vec2::new(0.0, 2.0).normalized().unwrap();
        assert!((n.x).abs() < 1e-12);
        assert!((n.y - 1.0).abs() < 1e-12);
        assert!(Vec2::zero().normalized().is_err());
    }

    #[test]
    fn test_vec2_perp_is_ccw() {
        let p = Vec2::new(1.0, 0.0).perp();
        assert!((p.x).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_rotated() {
        let r = Vec2::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!((r.x).abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_angle_roundtrip() {
        for angle in [0.0, 0.7, FRAC_PI_2, PI - 0.01, -1.3] {
            let v = Vec2::from_angle(angle);
            assert!((v.angle() - angle).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn test_vec2_midpoint() {
        let m = Vec2::new(0.0, 0.0).midpoint(Vec2::new(4.0, 2.0));
        assert!((m.x - 2.0).abs() < 1e-12);
        assert!((m.y - 1.0).abs() < 1e-12);
    }
}
