//! Intersection algorithms for lines, circles, and arcs.
//!
//! Every function is a pure query: it reports an empty result as a typed
//! outcome the caller must branch on, never by panicking or by returning
//! a list the caller indexes blindly.

use serde::{Deserialize, Serialize};

use kanon_core::{KanonError, KanonResult, ToleranceConfig, Vec2};

use crate::primitive::{Arc, Circle, Segment};

/// Outcome of intersecting two line segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineLine {
    /// The segments cross within both spans.
    Crossing(Vec2),
    /// The infinite carrier lines meet, but outside at least one segment.
    Extended(Vec2),
    /// Determinant ≈ 0: the carrier lines are parallel (or collinear).
    Parallel,
}

impl LineLine {
    /// The meeting point of the carrier lines, whether or not it falls
    /// within the segments.
    pub fn point(&self) -> Option<Vec2> {
        match self {
            LineLine::Crossing(p) | LineLine::Extended(p) => Some(*p),
            LineLine::Parallel => None,
        }
    }

    /// The meeting point only if it lies within both segments.
    pub fn crossing(&self) -> Option<Vec2> {
        match self {
            LineLine::Crossing(p) => Some(*p),
            _ => None,
        }
    }
}

/// Intersect two segments by solving the 2x2 linear system of their
/// parametric forms.
pub fn line_line(a: &Segment, b: &Segment, tol: &ToleranceConfig) -> LineLine {
    let da = a.end - a.start;
    let db = b.end - b.start;
    let det = da.cross(db);

    // det = |da||db| sin θ; comparing against the product keeps the
    // parallel test independent of segment lengths.
    if det.abs() <= tol.linear * da.length() * db.length() {
        return LineLine::Parallel;
    }

    let offset = b.start - a.start;
    let t = offset.cross(db) / det;
    let u = offset.cross(da) / det;
    let point = a.start + da * t;

    // Allow the crossing to sit within ε of a segment tip.
    let slack_a = tol.linear / da.length();
    let slack_b = tol.linear / db.length();
    let within = |v: f64, slack: f64| v >= -slack && v <= 1.0 + slack;

    if within(t, slack_a) && within(u, slack_b) {
        LineLine::Crossing(point)
    } else {
        LineLine::Extended(point)
    }
}

/// Intersect the infinite carrier lines of two segments.
pub fn line_line_unbounded(a: &Segment, b: &Segment, tol: &ToleranceConfig) -> Option<Vec2> {
    line_line(a, b, tol).point()
}

/// Intersect two circles via the radical-line construction.
///
/// Returns exactly two points in a fixed, reproducible order: with
/// `axis` the unit vector from `a.center` to `b.center`, the first point
/// lies on the counter-clockwise (`axis.perp()`) side of the axis and
/// the second on the clockwise side. Tangent circles return two
/// ε-coincident points.
pub fn circle_circle(a: &Circle, b: &Circle, tol: &ToleranceConfig) -> KanonResult<[Vec2; 2]> {
    let d = a.center.distance_to(b.center);

    if d < tol.linear {
        if (a.radius - b.radius).abs() < tol.linear {
            return Err(KanonError::degenerate(
                "coincident circles intersect everywhere",
            ));
        }
        return Err(KanonError::no_intersection(
            "concentric circles with unequal radii",
        ));
    }
    if d > a.radius + b.radius + tol.linear {
        return Err(KanonError::no_intersection(format!(
            "circles are disjoint (centers {d:.6} apart, radii sum {:.6})",
            a.radius + b.radius
        )));
    }
    if d < (a.radius - b.radius).abs() - tol.linear {
        return Err(KanonError::no_intersection(
            "one circle is contained in the other",
        ));
    }

    // Distance from a.center to the chord along the center axis.
    let along = (a.radius * a.radius - b.radius * b.radius + d * d) / (2.0 * d);
    // Half-chord; round-off at tangency can push the square slightly negative.
    let half_chord = (a.radius * a.radius - along * along).max(0.0).sqrt();

    let axis = (b.center - a.center) / d;
    let mid = a.center + axis * along;
    let lift = axis.perp() * half_chord;

    Ok([mid + lift, mid - lift])
}

/// Intersect a circle with a segment by substituting the segment's
/// parametric form into the circle equation.
///
/// Returns 0, 1, or 2 points ordered by increasing parameter along the
/// segment, keeping only parameters within [0, 1] (with ε slack).
pub fn circle_segment(c: &Circle, s: &Segment, tol: &ToleranceConfig) -> Vec<Vec2> {
    let d = s.end - s.start;
    let f = s.start - c.center;

    let qa = d.dot(d);
    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - c.radius * c.radius;

    let disc = qb * qb - 4.0 * qa * qc;
    // Tolerance band on the discriminant so grazing lines count as tangent.
    let disc_slack = 4.0 * qa * c.radius * tol.linear;
    if disc < -disc_slack {
        return Vec::new();
    }

    let root = disc.max(0.0).sqrt();
    let t1 = (-qb - root) / (2.0 * qa);
    let t2 = (-qb + root) / (2.0 * qa);

    let slack = tol.linear / s.length();
    let mut hits = Vec::new();
    for t in [t1, t2] {
        if t >= -slack && t <= 1.0 + slack {
            hits.push(s.point_at(t));
        }
    }
    // A tangent graze yields two ε-coincident roots; report one point.
    if hits.len() == 2 && tol.same_point(hits[0], hits[1]) {
        hits.truncate(1);
    }
    hits
}

/// Intersect a bounded arc with a segment: circle-segment intersection
/// clipped to the arc's angular span.
pub fn arc_segment(arc: &Arc, s: &Segment, tol: &ToleranceConfig) -> Vec<Vec2> {
    circle_segment(&arc.circle(), s, tol)
        .into_iter()
        .filter(|p| arc.contains_angle((*p - arc.center).angle(), tol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tol() -> ToleranceConfig {
        ToleranceConfig::unit()
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y2), &tol()).unwrap()
    }

    fn circ(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Vec2::new(x, y), r, &tol()).unwrap()
    }

    #[test]
    fn test_line_line_crossing() {
        let a = seg(0.0, 0.0, 2.0, 2.0);
        let b = seg(0.0, 2.0, 2.0, 0.0);
        match line_line(&a, &b, &tol()) {
            LineLine::Crossing(p) => {
                assert!((p.x - 1.0).abs() < 1e-12);
                assert!((p.y - 1.0).abs() < 1e-12);
            }
            other => panic!("expected crossing, got {:?}", other),
        }
    }

    #[test]
    fn test_line_line_parallel() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(0.0, 1.0, 1.0, 1.0);
        assert_eq!(line_line(&a, &b, &tol()), LineLine::Parallel);
    }

    #[test]
    fn test_line_line_outside_segments() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(3.0, -1.0, 3.0, 1.0);
        match line_line(&a, &b, &tol()) {
            LineLine::Extended(p) => {
                assert!((p.x - 3.0).abs() < 1e-12);
                assert!((p.y).abs() < 1e-12);
            }
            other => panic!("expected extended, got {:?}", other),
        }
        assert!(line_line(&a, &b, &tol()).crossing().is_none());
    }

    #[test]
    fn test_line_line_touching_at_tip() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(1.0, -1.0, 1.0, 1.0);
        assert!(matches!(line_line(&a, &b, &tol()), LineLine::Crossing(_)));
    }

    #[test]
    fn test_circle_circle_two_points() {
        // Radii 2 about (0,0) and (3,0): chord at x = 1.5, y = ±sqrt(1.75).
        let a = circ(0.0, 0.0, 2.0);
        let b = circ(3.0, 0.0, 2.0);
        let [p0, p1] = circle_circle(&a, &b, &tol()).unwrap();

        for p in [p0, p1] {
            assert!((a.center.distance_to(p) - 2.0).abs() < 1e-9);
            assert!((b.center.distance_to(p) - 2.0).abs() < 1e-9);
            assert!((p.x - 1.5).abs() < 1e-9);
        }
        assert!((p0.y - 1.75f64.sqrt()).abs() < 1e-9);
        assert!((p1.y + 1.75f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_circle_circle_order_is_deterministic() {
        let a = circ(0.3, -1.2, 2.5);
        let b = circ(2.0, 0.7, 1.9);
        let first = circle_circle(&a, &b, &tol()).unwrap();
        let second = circle_circle(&a, &b, &tol()).unwrap();
        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], second[1]);

        // First point sits on the counter-clockwise side of the axis.
        let axis = b.center - a.center;
        assert!(axis.cross(first[0] - a.center) > 0.0);
        assert!(axis.cross(first[1] - a.center) < 0.0);
    }

    #[test]
    fn test_circle_circle_disjoint() {
        let a = circ(0.0, 0.0, 1.0);
        let b = circ(5.0, 0.0, 1.0);
        assert!(matches!(
            circle_circle(&a, &b, &tol()),
            Err(KanonError::NoIntersection(_))
        ));
    }

    #[test]
    fn test_circle_circle_contained() {
        let a = circ(0.0, 0.0, 5.0);
        let b = circ(0.5, 0.0, 1.0);
        assert!(matches!(
            circle_circle(&a, &b, &tol()),
            Err(KanonError::NoIntersection(_))
        ));
    }

    #[test]
    fn test_circle_circle_concentric() {
        let a = circ(0.0, 0.0, 2.0);
        let unequal = circ(0.0, 0.0, 1.0);
        assert!(matches!(
            circle_circle(&a, &unequal, &tol()),
            Err(KanonError::NoIntersection(_))
        ));
        let equal = circ(0.0, 0.0, 2.0);
        assert!(matches!(
            circle_circle(&a, &equal, &tol()),
            Err(KanonError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_circle_circle_tangent_points_coincide() {
        let a = circ(0.0, 0.0, 1.0);
        let b = circ(2.0, 0.0, 1.0);
        let [p0, p1] = circle_circle(&a, &b, &tol()).unwrap();
        assert!(tol().same_point(p0, p1));
        assert!((p0.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_segment_secant() {
        let c = circ(0.0, 0.0, 1.0);
        let s = seg(-2.0, 0.0, 2.0, 0.0);
        let hits = circle_segment(&c, &s, &tol());
        assert_eq!(hits.len(), 2);
        // Ordered by segment parameter: left crossing first.
        assert!((hits[0].x + 1.0).abs() < 1e-9);
        assert!((hits[1].x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_segment_clips_to_span() {
        let c = circ(0.0, 0.0, 1.0);
        let s = seg(0.0, 0.0, 2.0, 0.0);
        let hits = circle_segment(&c, &s, &tol());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_segment_miss() {
        let c = circ(0.0, 0.0, 1.0);
        let s = seg(-2.0, 3.0, 2.0, 3.0);
        assert!(circle_segment(&c, &s, &tol()).is_empty());
    }

    #[test]
    fn test_circle_segment_tangent_single_point() {
        let c = circ(0.0, 0.0, 1.0);
        let s = seg(-2.0, 1.0, 2.0, 1.0);
        let hits = circle_segment(&c, &s, &tol());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y - 1.0).abs() < 1e-6);
        assert!((hits[0].x).abs() < 1e-6);
    }

    #[test]
    fn test_arc_segment_clips_to_arc_span() {
        // Upper half circle only: the diameter line crosses the full
        // circle twice but the arc at both ends exactly.
        let arc = Arc::new(Vec2::zero(), 1.0, 0.0, PI, &tol()).unwrap();
        let s = seg(-2.0, 0.5, 2.0, 0.5);
        let hits = arc_segment(&arc, &s, &tol());
        assert_eq!(hits.len(), 2);
        for p in &hits {
            assert!(p.y > 0.0);
        }

        let lower = seg(-2.0, -0.5, 2.0, -0.5);
        assert!(arc_segment(&arc, &lower, &tol()).is_empty());
    }
}
