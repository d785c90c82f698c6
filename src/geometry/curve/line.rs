use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{points_equal, Point2, Segment2, Vector2, TOLERANCE};

/// A bounded straight segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2d {
    pub start: Point2,
    pub end: Point2,
}

impl Line2d {
    /// Creates a new line segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the end points coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if points_equal(&start, &end, TOLERANCE) {
            return Err(GeometryError::Degenerate(format!(
                "zero-length line at ({}, {})",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    /// Unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a collapsed segment.
    pub fn tangent(&self) -> Result<Vector2> {
        self.as_segment()
            .direction()
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    #[must_use]
    pub fn as_segment(&self) -> Segment2 {
        Segment2::new(self.start, self.end)
    }

    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        point_to_segment_dist(p, &self.start, &self.end)
    }

    /// Number of pieces needed so that no piece exceeds `max_segment_length`.
    #[must_use]
    pub fn segment_count(&self, max_segment_length: Option<f64>) -> usize {
        match max_segment_length {
            Some(max) if max > 0.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = (self.length() / max).ceil() as usize;
                n.max(1)
            }
            _ => 1,
        }
    }

    /// Crossings of the horizontal line at height `y`.
    ///
    /// Half-open in y: an end point exactly at `y` is reported only when the
    /// other end lies above.
    #[must_use]
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2> {
        let (a, b) = (self.start, self.end);
        if (a.y > y) == (b.y > y) {
            return Vec::new();
        }
        let x = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
        vec![Point2::new(x, y)]
    }

    /// Twice the signed area swept from the origin (shoelace term).
    #[must_use]
    pub fn shoelace_term(&self) -> f64 {
        self.start.x * self.end.y - self.end.x * self.start.y
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> (Point2, Point2) {
        (
            Point2::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point2::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(Line2d::new(p(1.0, 1.0), p(1.0, 1.0)).is_err());
    }

    #[test]
    fn h_line_half_open() {
        let up = Line2d::new(p(0.0, 0.0), p(0.0, 1.0)).unwrap();
        // Lower end counts, upper end does not.
        assert_eq!(up.h_line_intersections(0.0).len(), 1);
        assert!(up.h_line_intersections(1.0).is_empty());
        let hits = up.h_line_intersections(0.5);
        assert!((hits[0].x).abs() < TOLERANCE);
    }

    #[test]
    fn horizontal_line_never_crosses() {
        let l = Line2d::new(p(0.0, 2.0), p(5.0, 2.0)).unwrap();
        assert!(l.h_line_intersections(2.0).is_empty());
    }

    #[test]
    fn segment_count_respects_max_length() {
        let l = Line2d::new(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        assert_eq!(l.segment_count(None), 1);
        assert_eq!(l.segment_count(Some(3.0)), 4);
    }
}
