use serde::{Deserialize, Serialize};

use super::{is_same_array, PlainData, PolyCurve2d};
use crate::error::Result;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A planar region: an outer boundary and zero or more holes.
///
/// By convention the outer chain runs counter-clockwise and the holes
/// clockwise. Neither the winding nor the absence of crossings is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon2d {
    pub outer: PolyCurve2d,
    #[serde(default)]
    pub holes: Vec<PolyCurve2d>,
}

/// Point rings of a discretised [`Polygon2d`], closing points not repeated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscretePolygon {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl DiscretePolygon {
    /// Total vertex count over all rings.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Signed area with holes contributing by their own winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.outer) + self.holes.iter().map(|h| signed_area_2d(h)).sum::<f64>()
    }
}

impl Polygon2d {
    #[must_use]
    pub fn new(outer: PolyCurve2d, holes: Vec<PolyCurve2d>) -> Self {
        Self { outer, holes }
    }

    /// Rebuilds a polygon from dumped data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or holds invalid curves.
    pub fn create(data: &serde_json::Value) -> Result<Self> {
        Self::load(data)
    }

    fn rings(&self) -> impl Iterator<Item = &PolyCurve2d> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Returns `true` if `p` lies within `tol` of the outer chain or a hole.
    #[must_use]
    pub fn is_point_on_outline(&self, p: &Point2, tol: f64) -> bool {
        self.rings().any(|ring| ring.is_point_on_curve(p, tol))
    }

    /// Even-odd containment test.
    ///
    /// With `include_outline` a point within `tol` of any boundary is
    /// inside. Otherwise a ray is cast towards `+x` and crossings with the
    /// outer chain and the holes are counted together.
    #[must_use]
    pub fn is_point_inside(&self, p: &Point2, include_outline: bool, tol: f64) -> bool {
        if include_outline && self.is_point_on_outline(p, tol) {
            return true;
        }
        let mut inside = false;
        for ring in self.rings() {
            for hit in ring.h_line_intersections(p.y) {
                if hit.x > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Structural equality: outer chains equal in order, holes equal as an
    /// unordered collection.
    #[must_use]
    pub fn is_same_polygon2d(&self, other: &Self, tol: f64) -> bool {
        self.outer.is_same_poly_curve(&other.outer, tol)
            && is_same_array(
                &self.holes,
                &other.holes,
                |a, b| a.is_same_poly_curve(b, tol),
                false,
            )
    }

    /// Exact signed area: the outer area plus the (negative) hole areas.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.rings().map(PolyCurve2d::signed_area).sum()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        self.outer.bounding_box()
    }

    #[must_use]
    pub fn to_discrete_polygon(
        &self,
        tolerance: f64,
        max_segment_length: Option<f64>,
    ) -> DiscretePolygon {
        DiscretePolygon {
            outer: self.outer.discrete(tolerance, max_segment_length),
            holes: self
                .holes
                .iter()
                .map(|h| h.discrete(tolerance, max_segment_length))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc2d, Curve2d};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn ring(points: &[(f64, f64)]) -> PolyCurve2d {
        let pts: Vec<Point2> = points.iter().map(|&(x, y)| p(x, y)).collect();
        PolyCurve2d::from_points(&pts).unwrap()
    }

    /// Square (0,0)-(10,10) with a clockwise hole (3,3)-(7,7).
    fn square_with_hole() -> Polygon2d {
        Polygon2d::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![ring(&[(3.0, 3.0), (3.0, 7.0), (7.0, 7.0), (7.0, 3.0)])],
        )
    }

    #[test]
    fn point_in_polygon_with_hole() {
        let poly = square_with_hole();
        assert!(poly.is_point_inside(&p(1.0, 1.0), false, 1e-6));
        assert!(!poly.is_point_inside(&p(5.0, 5.0), false, 1e-6));
        assert!(!poly.is_point_inside(&p(11.0, 5.0), false, 1e-6));
        assert!(poly.is_point_inside(&p(2.0, 5.0), false, 1e-6));
    }

    #[test]
    fn small_square_with_hole() {
        let poly = Polygon2d::new(
            ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![ring(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)])],
        );
        let tol = 1e-6;
        assert!(!poly.is_point_inside(&p(2.0, 2.0), false, tol));
        assert!(poly.is_point_inside(&p(0.5, 0.5), false, tol));
        assert!(!poly.is_point_inside(&p(5.0, 5.0), false, tol));
        assert!(poly.is_point_on_outline(&p(2.0, 0.0), tol));
        assert!(poly.is_point_inside(&p(2.0, 0.0), true, tol));

        // A point on the bottom edge sends its ray along that edge.
        let first = poly.is_point_inside(&p(2.0, 0.0), false, tol);
        for _ in 0..10 {
            assert_eq!(poly.is_point_inside(&p(2.0, 0.0), false, tol), first);
        }
    }

    #[test]
    fn outline_membership() {
        let poly = square_with_hole();
        assert!(poly.is_point_on_outline(&p(3.0, 5.0), 1e-6));
        assert!(poly.is_point_inside(&p(3.0, 5.0), true, 1e-6));
        assert!(poly.is_point_inside(&p(0.0, 0.0), true, 1e-6));
        assert!(!poly.is_point_on_outline(&p(5.0, 5.0), 1e-6));
    }

    #[test]
    fn ray_through_vertices_is_deterministic() {
        let poly = square_with_hole();
        // The ray at y = 3 runs along the hole's bottom edge and through its
        // corners; y = 0 runs along the outer bottom edge.
        let first = poly.is_point_inside(&p(1.0, 3.0), false, 1e-6);
        for _ in 0..10 {
            assert_eq!(poly.is_point_inside(&p(1.0, 3.0), false, 1e-6), first);
        }
        assert!(first);
        assert!(poly.is_point_inside(&p(8.0, 3.0), false, 1e-6));
        assert!(poly.is_point_inside(&p(1.0, 7.0), false, 1e-6));
    }

    #[test]
    fn point_inside_arc_boundary() {
        // Disc of radius 2 made of two arcs.
        let disc = Polygon2d::new(
            PolyCurve2d::new(vec![
                Arc2d::new(p(0.0, 0.0), 2.0, 0.0, PI, false).unwrap().into(),
                Arc2d::new(p(0.0, 0.0), 2.0, PI, 2.0 * PI, false).unwrap().into(),
            ]),
            vec![],
        );
        assert!(disc.is_point_inside(&p(0.0, 0.0), false, 1e-6));
        assert!(disc.is_point_inside(&p(1.9, 0.0), false, 1e-6));
        assert!(!disc.is_point_inside(&p(1.5, 1.5), false, 1e-6));
        assert!(!disc.is_point_inside(&p(-2.5, 0.0), false, 1e-6));
    }

    #[test]
    fn same_polygon_ignores_hole_order() {
        let outer = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let h1 = ring(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]);
        let h2 = ring(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (6.0, 5.0)]);
        let a = Polygon2d::new(outer.clone(), vec![h1.clone(), h2.clone()]);
        let b = Polygon2d::new(outer.clone(), vec![h2.clone(), h1.clone()]);
        let c = Polygon2d::new(outer, vec![h1.clone(), h1]);
        assert!(a.is_same_polygon2d(&b, 1e-9));
        assert!(!a.is_same_polygon2d(&c, 1e-9));
    }

    #[test]
    fn area_and_discretisation() {
        let poly = square_with_hole();
        assert_relative_eq!(poly.signed_area(), 84.0);
        let d = poly.to_discrete_polygon(0.01, None);
        assert_eq!(d.outer.len(), 4);
        assert_eq!(d.holes.len(), 1);
        assert_eq!(d.point_count(), 8);
        assert_relative_eq!(d.signed_area(), 84.0);
    }

    #[test]
    fn mixed_curves_round_trip_through_rings() {
        let outer = PolyCurve2d::new(vec![
            Curve2d::line(p(-2.0, 0.0), p(2.0, 0.0)).unwrap(),
            Arc2d::new(p(0.0, 0.0), 2.0, 0.0, PI, false).unwrap().into(),
        ]);
        let poly = Polygon2d::new(outer, vec![]);
        assert!(poly.is_point_inside(&p(0.0, 1.0), false, 1e-6));
        assert!(!poly.is_point_inside(&p(0.0, -1.0), false, 1e-6));
        assert_relative_eq!(poly.signed_area(), 2.0 * PI, epsilon = 1e-9);
    }
}
