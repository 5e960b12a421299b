use serde::{Deserialize, Serialize};

use kanon_core::math::normalize_angle;
use kanon_core::{KanonError, KanonResult, ToleranceConfig, Vec2};

use crate::primitive::Segment;

/// An ordered ring of vertices (≥ 3) with derived sides and interior
/// angles.
///
/// Side lengths and interior angles are computed lazily and cached per
/// instance; moving a vertex invalidates the caches so the derived
/// lists are recomputed, never shifted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    #[serde(skip)]
    side_lengths: Option<Vec<f64>>,
    #[serde(skip)]
    interior_angles: Option<Vec<f64>>,
}

impl Polygon {
    /// Build from an explicit vertex list. Requires at least three
    /// vertices with consecutive vertices distinct (including the
    /// closing pair).
    pub fn from_vertices(vertices: Vec<Vec2>, tol: &ToleranceConfig) -> KanonResult<Self> {
        if vertices.len() < 3 {
            return Err(KanonError::degenerate(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        for i in 0..vertices.len() {
            let next = (i + 1) % vertices.len();
            if tol.same_point(vertices[i], vertices[next]) {
                return Err(KanonError::degenerate(format!(
                    "consecutive polygon vertices {i} and {next} coincide"
                )));
            }
        }
        Ok(Self {
            vertices,
            side_lengths: None,
            interior_angles: None,
        })
    }

    /// Assemble from a closed chain of boundary segments. Consecutive
    /// segments (and the last back to the first) must touch end-to-start
    /// within ε; a gap is an error.
    pub fn from_segments(sides: &[Segment], tol: &ToleranceConfig) -> KanonResult<Self> {
        if sides.len() < 3 {
            return Err(KanonError::degenerate(format!(
                "polygon needs at least 3 sides, got {}",
                sides.len()
            )));
        }
        for (i, pair) in sides.windows(2).enumerate() {
            if !tol.same_point(pair[0].end, pair[1].start) {
                return Err(KanonError::degenerate(format!(
                    "polygon sides {i} and {} do not touch (gap {:.6})",
                    i + 1,
                    pair[0].end.distance_to(pair[1].start)
                )));
            }
        }
        let last = sides.len() - 1;
        if !tol.same_point(sides[last].end, sides[0].start) {
            return Err(KanonError::degenerate(format!(
                "polygon is not closed (gap {:.6})",
                sides[last].end.distance_to(sides[0].start)
            )));
        }
        Self::from_vertices(sides.iter().map(|s| s.start).collect(), tol)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Derived side segments: consecutive vertex pairs, wrapping. Always
    /// the same length as the vertex list.
    pub fn sides(&self, tol: &ToleranceConfig) -> KanonResult<Vec<Segment>> {
        (0..self.vertices.len())
            .map(|i| {
                let next = (i + 1) % self.vertices.len();
                Segment::new(self.vertices[i], self.vertices[next], tol)
            })
            .collect()
    }

    /// Relocate one vertex. Rejects a move that would collapse it onto
    /// a neighbor, and invalidates the derived caches.
    pub fn move_vertex(&mut self, index: usize, to: Vec2, tol: &ToleranceConfig) -> KanonResult<()> {
        if index >= self.vertices.len() {
            return Err(KanonError::InvalidArgument(format!(
                "vertex index {index} out of range for polygon of {}",
                self.vertices.len()
            )));
        }
        let n = self.vertices.len();
        let prev = self.vertices[(index + n - 1) % n];
        let next = self.vertices[(index + 1) % n];
        if tol.same_point(to, prev) || tol.same_point(to, next) {
            return Err(KanonError::degenerate(
                "moved vertex would coincide with a neighbor",
            ));
        }
        self.vertices[index] = to;
        self.side_lengths = None;
        self.interior_angles = None;
        Ok(())
    }

    /// Side lengths, cached until a vertex moves.
    pub fn side_lengths(&mut self) -> &[f64] {
        if self.side_lengths.is_none() {
            let n = self.vertices.len();
            self.side_lengths = Some(
                (0..n)
                    .map(|i| self.vertices[i].distance_to(self.vertices[(i + 1) % n]))
                    .collect(),
            );
        }
        self.side_lengths.as_deref().expect("computed above")
    }

    /// Interior angles (one per vertex, radians), cached until a vertex
    /// moves.
    pub fn interior_angles(&mut self) -> &[f64] {
        if self.interior_angles.is_none() {
            let n = self.vertices.len();
            let ccw = self.signed_area() >= 0.0;
            self.interior_angles = Some(
                (0..n)
                    .map(|i| {
                        let cur = self.vertices[i];
                        let to_prev = self.vertices[(i + n - 1) % n] - cur;
                        let to_next = self.vertices[(i + 1) % n] - cur;
                        if ccw {
                            normalize_angle(to_prev.angle() - to_next.angle())
                        } else {
                            normalize_angle(to_next.angle() - to_prev.angle())
                        }
                    })
                    .collect(),
            );
        }
        self.interior_angles.as_deref().expect("computed above")
    }

    /// Shoelace signed area: positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut acc = 0.0;
        for i in 0..n {
            acc += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        acc / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn tol() -> ToleranceConfig {
        ToleranceConfig::unit()
    }

    fn unit_square() -> Polygon {
        Polygon::from_vertices(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &tol(),
        )
        .unwrap()
    }

    #[test]
    fn test_polygon_rejects_too_few_vertices() {
        let v = vec![Vec2::zero(), Vec2::new(1.0, 0.0)];
        assert!(Polygon::from_vertices(v, &tol()).is_err());
    }

    #[test]
    fn test_polygon_rejects_coincident_neighbors() {
        let v = vec![
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        assert!(Polygon::from_vertices(v, &tol()).is_err());
    }

    #[test]
    fn test_polygon_sides_wrap() {
        let p = unit_square();
        let sides = p.sides(&tol()).unwrap();
        assert_eq!(sides.len(), 4);
        assert_eq!(sides[3].start, Vec2::new(0.0, 1.0));
        assert_eq!(sides[3].end, Vec2::zero());
    }

    #[test]
    fn test_polygon_from_segments() {
        let sides = unit_square().sides(&tol()).unwrap();
        let rebuilt = Polygon::from_segments(&sides, &tol()).unwrap();
        assert_eq!(rebuilt.vertices().len(), 4);
        assert_eq!(rebuilt.vertices()[1], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_polygon_from_segments_gap_fails() {
        let t = tol();
        let sides = [
            Segment::new(Vec2::zero(), Vec2::new(1.0, 0.0), &t).unwrap(),
            Segment::new(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0), &t).unwrap(),
            Segment::new(Vec2::new(1.0, 1.0), Vec2::zero(), &t).unwrap(),
        ];
        assert!(matches!(
            Polygon::from_segments(&sides, &t),
            Err(KanonError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_square_interior_angles() {
        let mut p = unit_square();
        for angle in p.interior_angles() {
            assert!((angle - FRAC_PI_2).abs() < 1e-9);
        }
        assert_eq!(p.interior_angles().len(), 4);
    }

    #[test]
    fn test_clockwise_square_interior_angles() {
        let mut p = Polygon::from_vertices(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
            ],
            &tol(),
        )
        .unwrap();
        assert!(p.signed_area() < 0.0);
        for angle in p.interior_angles() {
            assert!((angle - FRAC_PI_2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_move_vertex_invalidates_caches() {
        let mut p = unit_square();
        assert!((p.side_lengths()[0] - 1.0).abs() < 1e-12);
        p.move_vertex(1, Vec2::new(2.0, 0.0), &tol()).unwrap();
        assert!((p.side_lengths()[0] - 2.0).abs() < 1e-12);
        // Angle list is recomputed at the same length.
        assert_eq!(p.interior_angles().len(), 4);
        assert!((p.interior_angles()[2] - FRAC_PI_2).abs() > 1e-3);
    }

    #[test]
    fn test_move_vertex_rejects_collapse() {
        let mut p = unit_square();
        assert!(p.move_vertex(1, Vec2::new(0.0, 0.0), &tol()).is_err());
        assert!(p.move_vertex(9, Vec2::new(5.0, 5.0), &tol()).is_err());
    }

    #[test]
    fn test_signed_area() {
        assert!((unit_square().signed_area() - 1.0).abs() < 1e-12);
    }
}
