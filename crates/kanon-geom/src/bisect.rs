//! Classical angle bisection.
//!
//! Mirrors the straightedge-and-compass technique rather than averaging
//! angles numerically, because downstream proof steps visualize the
//! construction: cut both arms at equal distance from the vertex, raise
//! the equilateral point over the chord between the cuts, and join it
//! to the vertex.

use kanon_core::{KanonResult, ToleranceConfig, Vec2};

use crate::angle::measure_angle;
use crate::intersect::circle_circle;
use crate::primitive::{Circle, Segment};

/// Result of a classical bisection: the bisector itself plus the
/// auxiliary entities the construction used, so the lifecycle layer can
/// show and then remove them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    /// Vertex-to-apex bisector segment.
    pub bisector: Segment,
    /// Cut point at equal distance along the first arm.
    pub cut_a: Vec2,
    /// Cut point at equal distance along the second arm.
    pub cut_b: Vec2,
    /// Auxiliary circle about `cut_a`.
    pub aux_a: Circle,
    /// Auxiliary circle about `cut_b`.
    pub aux_b: Circle,
    /// The equilateral apex: the chosen intersection of the two
    /// auxiliary circles.
    pub apex: Vec2,
}

/// Bisect the angle between two lines sharing a vertex.
///
/// The resulting bisector's direction equals the angle average within
/// tolerance; the apex lands on the side selected by the measured
/// winding, so bisecting (l1, l2) and (l2, l1) gives the same ray.
pub fn bisect(l1: &Segment, l2: &Segment, tol: &ToleranceConfig) -> KanonResult<Bisection> {
    let angle = measure_angle(l1, l2, tol)?;
    let vertex = angle.vertex;

    let reach = (angle.arm1 - vertex)
        .length()
        .min((angle.arm2 - vertex).length());
    let dir1 = (angle.arm1 - vertex).normalized()?;
    let dir2 = (angle.arm2 - vertex).normalized()?;
    let cut_a = vertex + dir1 * reach;
    let cut_b = vertex + dir2 * reach;

    // Equilateral triangle over the chord between the cuts.
    let chord = cut_a.distance_to(cut_b);
    let aux_a = Circle::new(cut_a, chord, tol)?;
    let aux_b = Circle::new(cut_b, chord, tol)?;
    let candidates = circle_circle(&aux_a, &aux_b, tol)?;

    // Both candidates lie on the bisector line through the vertex; keep
    // the one on the winding's interior side.
    let want = angle.bisector_direction();
    let apex = if (candidates[0] - vertex).dot(want) >= (candidates[1] - vertex).dot(want) {
        candidates[0]
    } else {
        candidates[1]
    };

    Ok(Bisection {
        bisector: Segment::new(vertex, apex, tol)?,
        cut_a,
        cut_b,
        aux_a,
        aux_b,
        apex,
    })
}
