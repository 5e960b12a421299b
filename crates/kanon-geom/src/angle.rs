//! Angle measurement between two lines sharing a common vertex.
//!
//! An angle is not a stored entity: it is a relation recomputed from
//! the two defining lines, so it stays correct when either line moves.

use kanon_core::math::normalize_angle;
use kanon_core::{KanonError, KanonResult, ToleranceConfig, Vec2};

use crate::marker::AngleMarker;
use crate::primitive::Segment;

/// A measured angle: the shared vertex, the two arm endpoints, and the
/// counter-clockwise winding from the first arm to the second in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredAngle {
    pub vertex: Vec2,
    /// The non-vertex endpoint of the first line.
    pub arm1: Vec2,
    /// The non-vertex endpoint of the second line.
    pub arm2: Vec2,
    /// Winding from arm1's direction to arm2's direction, in [0, 2π).
    pub radians: f64,
}

impl MeasuredAngle {
    /// Unit direction of the classical bisector: the first arm's
    /// direction rotated by half the winding.
    pub fn bisector_direction(&self) -> Vec2 {
        let dir1 = (self.arm1 - self.vertex).angle();
        Vec2::from_angle(dir1 + self.radians / 2.0)
    }

    /// Select the rendering marker for this angle. Classification is a
    /// rendering decision; `radians` is the semantic value either way.
    pub fn marker(&self, tol: &ToleranceConfig, allow_right: bool) -> AngleMarker {
        AngleMarker::classify(self.radians, tol, allow_right)
    }
}

/// Measure the angle between two lines.
///
/// Exactly one of the four endpoint pairings must coincide within the
/// linear tolerance; zero coincidences fail with `NoCommonVertex`, two
/// or more with `AmbiguousVertex`. The winding convention is fixed:
/// second line's direction minus first line's direction, reduced to
/// [0, 2π), so `measure_angle(l2, l1)` is the complementary winding.
pub fn measure_angle(
    l1: &Segment,
    l2: &Segment,
    tol: &ToleranceConfig,
) -> KanonResult<MeasuredAngle> {
    // (vertex candidate on l1, vertex candidate on l2, far end of l1, far end of l2)
    let pairings = [
        (l1.start, l2.start, l1.end, l2.end),
        (l1.start, l2.end, l1.end, l2.start),
        (l1.end, l2.start, l1.start, l2.end),
        (l1.end, l2.end, l1.start, l2.start),
    ];

    let mut hit = None;
    let mut hits = 0;
    let mut closest = f64::INFINITY;
    for (v1, v2, a1, a2) in pairings {
        let gap = v1.distance_to(v2);
        closest = closest.min(gap);
        if gap < tol.linear {
            hits += 1;
            hit = Some((v1.midpoint(v2), a1, a2));
        }
    }

    match hits {
        0 => Err(KanonError::NoCommonVertex { gap: closest }),
        1 => {
            let (vertex, arm1, arm2) = hit.expect("hit recorded");
            let d1 = (arm1 - vertex).angle();
            let d2 = (arm2 - vertex).angle();
            Ok(MeasuredAngle {
                vertex,
                arm1,
                arm2,
                radians: normalize_angle(d2 - d1),
            })
        }
        n => Err(KanonError::AmbiguousVertex { pairings: n }),
    }
}
