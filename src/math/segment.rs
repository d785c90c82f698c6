use super::distance_2d::point_to_segment_dist;
use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// A directed line segment in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: Point2,
    pub end: Point2,
}

impl Segment2 {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Returns the unit direction, or `None` for a zero-length segment.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        let v = self.vector();
        let len = v.norm();
        (len >= TOLERANCE).then(|| v / len)
    }

    /// Returns the point at parameter `t` (0 = start, 1 = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.vector() * t
    }

    /// Minimum distance from `p` to the segment.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        point_to_segment_dist(p, &self.start, &self.end)
    }

    /// Returns `true` if the segments cross.
    ///
    /// Each segment must straddle the other's supporting line. Endpoints
    /// lying on the other line count as crossing. Fully collinear segments
    /// cross only when their extents overlap.
    #[must_use]
    pub fn crosses(&self, other: &Self) -> bool {
        let d = self.vector();
        let e = other.vector();
        let d1 = cross_2d(&d, &(other.start - self.start));
        let d2 = cross_2d(&d, &(other.end - self.start));
        let d3 = cross_2d(&e, &(self.start - other.start));
        let d4 = cross_2d(&e, &(self.end - other.start));

        if d1 == 0.0 && d2 == 0.0 && d3 == 0.0 && d4 == 0.0 {
            return ranges_overlap(self.start.x, self.end.x, other.start.x, other.end.x)
                && ranges_overlap(self.start.y, self.end.y, other.start.y, other.end.y);
        }

        d1 * d2 <= 0.0 && d3 * d4 <= 0.0
    }

    /// Bounded intersection point of two segments, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Point2> {
        super::intersect_2d::segment_segment_intersect_2d(
            &self.start,
            &self.end,
            &other.start,
            &other.end,
        )
        .map(|(pt, _, _)| pt)
    }

    /// Returns the segment with start and end swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

fn ranges_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
    a0.min(a1) <= b0.max(b1) && b0.min(b1) <= a0.max(a1)
}
