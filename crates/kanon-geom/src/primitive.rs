use serde::{Deserialize, Serialize};

use kanon_core::math::normalize_angle;
use kanon_core::{KanonError, KanonResult, ToleranceConfig, Vec2};

/// A line segment between two resolved coordinates.
///
/// Construction rejects degenerate (zero-length) segments; everything
/// else — length, direction, inclination — is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    /// Create a segment. Fails with `DegenerateGeometry` if the endpoints
    /// coincide within the linear tolerance.
    pub fn new(start: Vec2, end: Vec2, tol: &ToleranceConfig) -> KanonResult<Self> {
        if tol.same_point(start, end) {
            return Err(KanonError::degenerate(format!(
                "zero-length segment at ({:.6}, {:.6})",
                start.x, start.y
            )));
        }
        Ok(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Unit direction vector from start to end.
    pub fn direction(&self) -> Vec2 {
        // Safe: construction rejected zero-length segments.
        (self.end - self.start) / self.length()
    }

    /// Angle of inclination in radians, in [0, 2π).
    pub fn angle(&self) -> f64 {
        normalize_angle((self.end - self.start).angle())
    }

    pub fn midpoint(&self) -> Vec2 {
        self.start.midpoint(self.end)
    }

    /// Point at normalized parameter t (0 = start, 1 = end).
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.start.lerp(self.end, t)
    }

    /// Point at the given distance from start along the segment.
    pub fn point_at_distance(&self, distance: f64) -> Vec2 {
        self.start + self.direction() * distance
    }

    /// The same segment with its end pushed `by` further along the
    /// direction of travel (negative values shrink it).
    pub fn extended(&self, by: f64) -> Segment {
        Segment {
            start: self.start,
            end: self.end + self.direction() * by,
        }
    }

    /// The segment traversed in the opposite direction.
    pub fn reversed(&self) -> Segment {
        Segment {
            start: self.end,
            end: self.start,
        }
    }
}

/// A circle defined by center and radius.
///
/// When a circle entity is defined by a center and a rim point, the
/// radius here is derived at resolution time so the circle stays
/// consistent if the center moves (see `figure`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    /// Create a circle. Fails with `DegenerateGeometry` on a zero or
    /// negative radius.
    pub fn new(center: Vec2, radius: f64, tol: &ToleranceConfig) -> KanonResult<Self> {
        if tol.is_zero_length(radius) || radius < 0.0 {
            return Err(KanonError::degenerate(format!(
                "circle radius must be positive, got {radius:.6}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Circle through `rim`, centered at `center`.
    pub fn from_rim(center: Vec2, rim: Vec2, tol: &ToleranceConfig) -> KanonResult<Self> {
        Self::new(center, center.distance_to(rim), tol)
    }

    /// Point on the circumference at the given angle from the positive
    /// x axis.
    pub fn point_at_angle(&self, angle: f64) -> Vec2 {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// Whether the point lies strictly inside the circle (beyond the
    /// linear tolerance band around the circumference).
    pub fn contains(&self, p: Vec2, tol: &ToleranceConfig) -> bool {
        self.center.distance_to(p) < self.radius - tol.linear
    }
}

/// A circular arc: center, radius, start angle, and signed sweep.
///
/// A positive sweep runs counter-clockwise from the start angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Vec2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Arc {
    pub fn new(
        center: Vec2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        tol: &ToleranceConfig,
    ) -> KanonResult<Self> {
        if tol.is_zero_length(radius) || radius < 0.0 {
            return Err(KanonError::degenerate(format!(
                "arc radius must be positive, got {radius:.6}"
            )));
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// The full circle this arc lies on.
    pub fn circle(&self) -> Circle {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }

    /// Point at normalized parameter t (0 = start of sweep, 1 = end).
    pub fn point_at(&self, t: f64) -> Vec2 {
        let angle = self.start_angle + self.sweep * t;
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// Whether the given absolute angle falls within the arc's sweep.
    pub fn contains_angle(&self, angle: f64, tol: &ToleranceConfig) -> bool {
        let slack = tol.angular + tol.linear / self.radius;
        if self.sweep >= 0.0 {
            normalize_angle(angle - self.start_angle) <= self.sweep + slack
        } else {
            normalize_angle(self.start_angle - angle) <= -self.sweep + slack
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn tol() -> ToleranceConfig {
        ToleranceConfig::unit()
    }

    #[test]
    fn test_segment_rejects_degenerate() {
        let p = Vec2::new(1.0, 2.0);
        assert!(Segment::new(p, p, &tol()).is_err());
        assert!(Segment::new(p, Vec2::new(1.0 + 1e-9, 2.0), &tol()).is_err());
    }

    #[test]
    fn test_segment_derived_attributes() {
        let s = Segment::new(Vec2::zero(), Vec2::new(3.0, 4.0), &tol()).unwrap();
        assert!((s.length() - 5.0).abs() < 1e-12);
        let d = s.direction();
        assert!((d.x - 0.6).abs() < 1e-12);
        assert!((d.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_segment_angle_in_canonical_range() {
        let s = Segment::new(Vec2::zero(), Vec2::new(0.0, -1.0), &tol()).unwrap();
        assert!((s.angle() - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_segment_point_at_distance() {
        let s = Segment::new(Vec2::zero(), Vec2::new(10.0, 0.0), &tol()).unwrap();
        let p = s.point_at_distance(4.0);
        assert!((p.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_extended() {
        let s = Segment::new(Vec2::zero(), Vec2::new(1.0, 0.0), &tol()).unwrap();
        let e = s.extended(2.0);
        assert!((e.end.x - 3.0).abs() < 1e-12);
        assert_eq!(e.start, s.start);
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        assert!(Circle::new(Vec2::zero(), 0.0, &tol()).is_err());
        assert!(Circle::new(Vec2::zero(), -1.0, &tol()).is_err());
    }

    #[test]
    fn test_circle_from_rim_derives_radius() {
        let c = Circle::from_rim(Vec2::zero(), Vec2::new(3.0, 4.0), &tol()).unwrap();
        assert!((c.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_point_at_angle() {
        let c = Circle::new(Vec2::new(1.0, 0.0), 2.0, &tol()).unwrap();
        let p = c.point_at_angle(FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_contains_angle_positive_sweep() {
        let a = Arc::new(Vec2::zero(), 1.0, 0.0, PI, &tol()).unwrap();
        assert!(a.contains_angle(FRAC_PI_2, &tol()));
        assert!(a.contains_angle(PI, &tol()));
        assert!(!a.contains_angle(3.0 * FRAC_PI_2, &tol()));
    }

    #[test]
    fn test_arc_contains_angle_negative_sweep() {
        let a = Arc::new(Vec2::zero(), 1.0, 0.0, -FRAC_PI_2, &tol()).unwrap();
        assert!(a.contains_angle(-0.5, &tol()));
        assert!(!a.contains_angle(FRAC_PI_2, &tol()));
    }

    #[test]
    fn test_arc_point_at() {
        let a = Arc::new(Vec2::zero(), 2.0, 0.0, PI, &tol()).unwrap();
        let p = a.point_at(0.5);
        assert!((p.x).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
