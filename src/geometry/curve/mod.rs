mod arc;
mod line;

pub use arc::Arc2d;
pub use line::Line2d;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::intersect_2d::{
    arc_arc_intersect_2d, line_arc_intersect_2d, segment_segment_intersect_2d,
};
use crate::math::{points_equal, Point2, Vector2};

/// A bounded planar curve.
///
/// All curves are parametrised over `[0, 1]` from start to end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve2d {
    Line(Line2d),
    Arc(Arc2d),
}

impl From<Line2d> for Curve2d {
    fn from(line: Line2d) -> Self {
        Self::Line(line)
    }
}

impl From<Arc2d> for Curve2d {
    fn from(arc: Arc2d) -> Self {
        Self::Arc(arc)
    }
}

impl Curve2d {
    /// Straight curve between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn line(start: Point2, end: Point2) -> Result<Self> {
        Line2d::new(start, end).map(Self::Line)
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        match self {
            Self::Line(l) => l.start,
            Self::Arc(a) => a.start_point(),
        }
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        match self {
            Self::Line(l) => l.end,
            Self::Arc(a) => a.end_point(),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Line(l) => l.point_at(t),
            Self::Arc(a) => a.point_at(t),
        }
    }

    /// Unit tangent leaving the start point.
    ///
    /// # Errors
    ///
    /// Returns an error for a collapsed line.
    pub fn start_tangent(&self) -> Result<Vector2> {
        match self {
            Self::Line(l) => l.tangent(),
            Self::Arc(a) => Ok(a.tangent_at_angle(a.start_angle)),
        }
    }

    /// Unit tangent arriving at the end point.
    ///
    /// # Errors
    ///
    /// Returns an error for a collapsed line.
    pub fn end_tangent(&self) -> Result<Vector2> {
        match self {
            Self::Line(l) => l.tangent(),
            Self::Arc(a) => Ok(a.tangent_at_angle(a.start_angle + a.sweep())),
        }
    }

    /// Number of pieces [`Curve2d::discrete`] splits the curve into.
    #[must_use]
    pub fn segment_count(&self, tolerance: f64, max_segment_length: Option<f64>) -> usize {
        match self {
            Self::Line(l) => l.segment_count(max_segment_length),
            Self::Arc(a) => a.segment_count(tolerance, max_segment_length),
        }
    }

    /// Samples the curve at `n + 1` evenly spaced parameters, both end
    /// points included.
    #[must_use]
    pub fn discrete_n(&self, n: usize) -> Vec<Point2> {
        let n = n.max(1);
        let mut points = Vec::with_capacity(n + 1);
        points.push(self.start_point());
        for i in 1..n {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / n as f64;
            points.push(self.point_at(t));
        }
        points.push(self.end_point());
        points
    }

    /// Polyline approximation within `tolerance` of the curve.
    #[must_use]
    pub fn discrete(&self, tolerance: f64, max_segment_length: Option<f64>) -> Vec<Point2> {
        self.discrete_n(self.segment_count(tolerance, max_segment_length))
    }

    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        match self {
            Self::Line(l) => l.distance_to(p),
            Self::Arc(a) => a.distance_to(p),
        }
    }

    #[must_use]
    pub fn is_point_on_curve(&self, p: &Point2, tol: f64) -> bool {
        self.distance_to(p) <= tol
    }

    /// Crossings of the horizontal line at height `y`, used for ray casting.
    #[must_use]
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2> {
        match self {
            Self::Line(l) => l.h_line_intersections(y),
            Self::Arc(a) => a.h_line_intersections(y),
        }
    }

    /// Twice the signed area between the curve and the origin.
    #[must_use]
    pub fn shoelace_term(&self) -> f64 {
        match self {
            Self::Line(l) => l.shoelace_term(),
            Self::Arc(a) => a.shoelace_term(),
        }
    }

    /// Portion of the curve between parameters `t0 < t1`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` when the range is empty
    /// or outside `[0, 1]`.
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Result<Self> {
        match self {
            Self::Line(l) => {
                arc::check_sub_range(t0, t1)?;
                Line2d::new(l.point_at(t0), l.point_at(t1)).map(Self::Line)
            }
            Self::Arc(a) => a.sub_arc(t0, t1).map(Self::Arc),
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.reversed()),
            Self::Arc(a) => Self::Arc(a.reversed()),
        }
    }

    /// Geometric equality within `tol`, direction included.
    #[must_use]
    pub fn is_same_curve(&self, other: &Self, tol: f64) -> bool {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                points_equal(&a.start, &b.start, tol) && points_equal(&a.end, &b.end, tol)
            }
            (Self::Arc(a), Self::Arc(b)) => {
                a.clockwise == b.clockwise
                    && points_equal(&a.center, &b.center, tol)
                    && (a.radius - b.radius).abs() < tol
                    && points_equal(&a.start_point(), &b.start_point(), tol)
                    && points_equal(&a.end_point(), &b.end_point(), tol)
                    && (a.length() - b.length()).abs() < tol
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> (Point2, Point2) {
        match self {
            Self::Line(l) => l.bounding_box(),
            Self::Arc(a) => a.bounding_box(),
        }
    }

    /// Intersection points with another curve.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<Point2> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                segment_segment_intersect_2d(&a.start, &a.end, &b.start, &b.end)
                    .map(|(p, _, _)| vec![p])
                    .unwrap_or_default()
            }
            (Self::Line(l), Self::Arc(a)) | (Self::Arc(a), Self::Line(l)) => {
                line_arc_intersect_2d(
                    &l.start,
                    &l.end,
                    &a.center,
                    a.radius,
                    a.start_angle,
                    a.sweep(),
                )
                .into_iter()
                .map(|(p, _, _)| p)
                .collect()
            }
            (Self::Arc(a), Self::Arc(b)) => arc_arc_intersect_2d(
                &a.center,
                a.radius,
                a.start_angle,
                a.sweep(),
                &b.center,
                b.radius,
                b.start_angle,
                b.sweep(),
            )
            .into_iter()
            .map(|(p, _, _)| p)
            .collect(),
        }
    }

    /// Checks the invariants of a loaded curve.
    pub(crate) fn check(&self) -> Result<()> {
        match self {
            Self::Line(l) => Line2d::new(l.start, l.end).map(|_| ()),
            Self::Arc(a) => a.check(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn semicircle() -> Curve2d {
        Arc2d::new(p(0.0, 0.0), 1.0, 0.0, PI, false).unwrap().into()
    }

    #[test]
    fn discrete_includes_both_end_points() {
        let c = semicircle();
        let pts = c.discrete(0.01, None);
        assert!(pts.len() > 3);
        assert!(points_equal(&pts[0], &c.start_point(), 1e-12));
        assert!(points_equal(pts.last().unwrap(), &c.end_point(), 1e-12));
        for q in &pts {
            assert!(c.is_point_on_curve(q, 1e-9), "q={q:?}");
        }
    }

    #[test]
    fn discrete_line_with_max_length() {
        let c = Curve2d::line(p(0.0, 0.0), p(4.0, 0.0)).unwrap();
        let pts = c.discrete(0.01, Some(1.0));
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[2].x, 2.0);
    }

    #[test]
    fn tangents_follow_travel_direction() {
        let c = semicircle();
        let ts = c.start_tangent().unwrap();
        let te = c.end_tangent().unwrap();
        assert_relative_eq!(ts.y, 1.0);
        assert_relative_eq!(te.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn reversed_is_same_only_when_reversed_back() {
        let c = semicircle();
        assert!(!c.is_same_curve(&c.reversed(), 1e-9));
        assert!(c.is_same_curve(&c.reversed().reversed(), 1e-9));
    }

    #[test]
    fn line_and_arc_are_never_the_same() {
        let l = Curve2d::line(p(1.0, 0.0), p(-1.0, 0.0)).unwrap();
        assert!(!l.is_same_curve(&semicircle(), 1e-6));
    }

    #[test]
    fn sub_curve_of_line() {
        let l = Curve2d::line(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        let s = l.sub_curve(0.2, 0.5).unwrap();
        assert_relative_eq!(s.start_point().x, 2.0);
        assert_relative_eq!(s.end_point().x, 5.0);
        assert!(l.sub_curve(0.5, 0.5).is_err());
        assert!(l.sub_curve(-0.1, 0.5).is_err());
    }

    #[test]
    fn line_arc_intersections() {
        let l = Curve2d::line(p(-2.0, 0.5), p(2.0, 0.5)).unwrap();
        let hits = l.intersections(&semicircle());
        assert_eq!(hits.len(), 2);
        assert_eq!(semicircle().intersections(&l).len(), 2);
    }

    #[test]
    fn serde_uses_type_tag() {
        let l = Curve2d::line(p(0.0, 0.0), p(1.0, 2.0)).unwrap();
        let v = serde_json::to_value(l).unwrap();
        assert_eq!(v["type"], "Line");
        let back: Curve2d = serde_json::from_value(v).unwrap();
        assert!(back.is_same_curve(&l, 1e-12));
    }
}
