//! Tangent-line construction from a point to a circle, via the
//! classical Thales-circle auxiliary construction.

use serde::{Deserialize, Serialize};

use kanon_core::{KanonError, KanonResult, ToleranceConfig, Vec2};

use crate::intersect::circle_circle;
use crate::primitive::{Circle, Segment};

/// Which of the two tangent lines to construct. `Positive` selects the
/// tangent point on the counter-clockwise side of the center→point
/// axis, `Negative` the clockwise side. An explicit selector, so
/// callers never depend on an arbitrary intersection-order choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentSide {
    Positive,
    Negative,
}

/// Construct the tangent segment from `p` to `circle`, touching on the
/// selected side.
///
/// Fails with `PointInsideCircle` if `p` is strictly inside. If `p`
/// lies on the circumference (within ε), the tangent is the segment
/// from `p` perpendicular to the radius, one radius long, leaving on
/// the selected side. Otherwise the tangent point comes from
/// intersecting the circle with the Thales circle on diameter
/// center–p, then snapping it onto the circumference to absorb the
/// round-off of the nested intersection chain.
pub fn tangent(
    p: Vec2,
    circle: &Circle,
    side: TangentSide,
    tol: &ToleranceConfig,
) -> KanonResult<Segment> {
    let to_p = p - circle.center;
    let distance = to_p.length();

    if distance < circle.radius - tol.linear {
        return Err(KanonError::PointInsideCircle {
            distance,
            radius: circle.radius,
        });
    }

    if (distance - circle.radius).abs() <= tol.linear {
        // On the rim: tangent is perpendicular to the radius at p.
        let along = to_p.normalized()?.perp();
        let end = match side {
            TangentSide::Positive => p + along * circle.radius,
            TangentSide::Negative => p - along * circle.radius,
        };
        return Segment::new(p, end, tol);
    }

    // Thales circle on the diameter center–p: any rim point of it sees
    // that diameter under a right angle, so its intersections with the
    // target circle are exactly the tangent points.
    let thales = Circle::new(circle.center.midpoint(p), distance / 2.0, tol)?;
    let hits = circle_circle(circle, &thales, tol)?;

    // circle_circle orders by side of the axis circle.center → thales
    // center, which points toward p; Positive is the CCW hit.
    let raw = match side {
        TangentSide::Positive => hits[0],
        TangentSide::Negative => hits[1],
    };

    // Snap so the tangent point is at the radius exactly.
    let touch = circle.center + (raw - circle.center).normalized()? * circle.radius;
    Segment::new(p, touch, tol)
}
