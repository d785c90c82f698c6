use serde::{Deserialize, Serialize};

use super::{is_same_array, Curve2d};
use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::dedup_ring;
use crate::math::{points_equal, Point2, TOLERANCE};

/// An ordered chain of curves.
///
/// Closure (each curve ending where the next one starts, the last one
/// ending at the first start) is checked by [`PolyCurve2d::validate`], not
/// enforced on construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyCurve2d {
    curves: Vec<Curve2d>,
}

impl PolyCurve2d {
    #[must_use]
    pub fn new(curves: Vec<Curve2d>) -> Self {
        Self { curves }
    }

    /// Closed chain of straight curves through `points`.
    ///
    /// Consecutive duplicate points (including last to first) are dropped.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if fewer than 3 distinct points remain.
    pub fn from_points(points: &[Point2]) -> Result<Self> {
        let ring = dedup_ring(points, TOLERANCE);
        if ring.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "closed chain needs 3 distinct points, got {}",
                ring.len()
            ))
            .into());
        }
        let n = ring.len();
        let curves = (0..n)
            .map(|i| Curve2d::line(ring[i], ring[(i + 1) % n]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { curves })
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve2d] {
        &self.curves
    }

    pub fn push(&mut self, curve: Curve2d) {
        self.curves.push(curve);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Returns `true` if the chain is non-empty and closed within `tol`.
    #[must_use]
    pub fn validate(&self, tol: f64) -> bool {
        let n = self.curves.len();
        n > 0
            && (0..n).all(|i| {
                let next = &self.curves[(i + 1) % n];
                points_equal(&self.curves[i].end_point(), &next.start_point(), tol)
            })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.curves.iter().map(Curve2d::length).sum()
    }

    /// Exact signed area enclosed by the closed chain (positive when CCW).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        0.5 * self.curves.iter().map(Curve2d::shoelace_term).sum::<f64>()
    }

    #[must_use]
    pub fn is_point_on_curve(&self, p: &Point2, tol: f64) -> bool {
        self.curves.iter().any(|c| c.is_point_on_curve(p, tol))
    }

    #[must_use]
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2> {
        self.curves
            .iter()
            .flat_map(|c| c.h_line_intersections(y))
            .collect()
    }

    /// Point ring approximating the chain, closing point not repeated.
    #[must_use]
    pub fn discrete(&self, tolerance: f64, max_segment_length: Option<f64>) -> Vec<Point2> {
        self.discrete_with(|c| c.segment_count(tolerance, max_segment_length))
    }

    /// Point ring with the per-curve piece count chosen by `count`.
    pub fn discrete_with(&self, mut count: impl FnMut(&Curve2d) -> usize) -> Vec<Point2> {
        let mut ring: Vec<Point2> = Vec::new();
        for curve in &self.curves {
            let pts = curve.discrete_n(count(curve));
            let skip = usize::from(
                ring.last()
                    .is_some_and(|last| points_equal(last, &pts[0], TOLERANCE)),
            );
            ring.extend_from_slice(&pts[skip..]);
        }
        dedup_ring(&ring, TOLERANCE)
    }

    /// Same chain traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            curves: self.curves.iter().rev().map(Curve2d::reversed).collect(),
        }
    }

    /// Axis-aligned bounds, `None` for an empty chain.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        self.curves
            .iter()
            .map(Curve2d::bounding_box)
            .reduce(|(min_a, max_a), (min_b, max_b)| {
                (
                    Point2::new(min_a.x.min(min_b.x), min_a.y.min(min_b.y)),
                    Point2::new(max_a.x.max(max_b.x), max_a.y.max(max_b.y)),
                )
            })
    }

    /// Curve-by-curve equality in order.
    #[must_use]
    pub fn is_same_poly_curve(&self, other: &Self, tol: f64) -> bool {
        is_same_array(
            &self.curves,
            &other.curves,
            |a, b| a.is_same_curve(b, tol),
            true,
        )
    }
}
