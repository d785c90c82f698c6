use super::{Point2, Segment2, Vector2, TOLERANCE};
use crate::error::GeometryError;

/// Implicit line `a·x + b·y + c = 0` with a unit normal `(a, b)`.
///
/// Built from two points the normal points to the left of the direction
/// `p1 → p2`, so a positive [`Line2::offset`] moves the line to the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line2 {
    /// Line through two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points coincide.
    pub fn from_points(p1: &Point2, p2: &Point2) -> Result<Self, GeometryError> {
        let a = p1.y - p2.y;
        let b = p2.x - p1.x;
        let norm = a.hypot(b);
        if norm < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "line through coincident points ({}, {})",
                p1.x, p1.y
            )));
        }
        let (a, b) = (a / norm, b / norm);
        Ok(Self {
            a,
            b,
            c: -a * p1.x - b * p1.y,
        })
    }

    /// Supporting line of a segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a zero-length segment.
    pub fn from_segment(seg: &Segment2) -> Result<Self, GeometryError> {
        Self::from_points(&seg.start, &seg.end)
    }

    #[must_use]
    pub fn normal(&self) -> Vector2 {
        Vector2::new(self.a, self.b)
    }

    /// Direction along the line (normal rotated a quarter turn CW).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.b, -self.a)
    }

    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Parallel line shifted by `d` along the normal.
    #[must_use]
    pub fn offset(&self, d: f64) -> Self {
        Self {
            c: self.c - d,
            ..*self
        }
    }

    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        (self.a * other.b - other.a * self.b).abs() < TOLERANCE
    }

    /// Intersection point of two lines, `None` when parallel.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Point2> {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() < TOLERANCE {
            return None;
        }
        Some(Point2::new(
            (self.b * other.c - other.b * self.c) / det,
            (other.a * self.c - self.a * other.c) / det,
        ))
    }

    /// Crosses this line with the supporting line of `seg`.
    ///
    /// Returns the point and its parameter on the segment (`0` at start,
    /// `1` at end, unbounded). `None` when the segment is parallel.
    #[must_use]
    pub fn intersect_segment(&self, seg: &Segment2) -> Option<(Point2, f64)> {
        let d1 = self.signed_distance(&seg.start);
        let d2 = self.signed_distance(&seg.end);
        let denom = d1 - d2;
        if denom.abs() < TOLERANCE * TOLERANCE.max(seg.length()) {
            return None;
        }
        let t = d1 / denom;
        Some((seg.point_at(t), t))
    }
}
