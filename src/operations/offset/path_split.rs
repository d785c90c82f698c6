use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::polygon_2d::{is_clockwise, left_normal, segment_direction};
use crate::math::{cross_2d, Line2, Point2, Segment2, TOLERANCE};

/// Slack on the normalised corner cross product; near-straight corners
/// count as convex.
const CONVEX_EPS: f64 = 1e-9;

/// One original edge split into its inner and outer side.
///
/// `inner` lies on the original edge's line, `outer` on the offset edge's
/// line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSegment {
    pub inner: Segment2,
    pub outer: Segment2,
}

impl SplitSegment {
    /// Quadrilateral `[inner.start, inner.end, outer.end, outer.start]`.
    #[must_use]
    pub fn quad(&self) -> [Point2; 4] {
        [
            self.inner.start,
            self.inner.end,
            self.outer.end,
            self.outer.start,
        ]
    }
}

/// End pairs of the two edges meeting at one vertex.
#[derive(Debug, Clone, Copy)]
struct Corner {
    convex: bool,
    /// `(inner, outer)` where the incoming edge stops.
    incoming_end: (Point2, Point2),
    /// `(inner, outer)` where the outgoing edge starts.
    outgoing_start: (Point2, Point2),
}

/// Returns `true` if the ring turns left (or goes straight) at `cur`.
///
/// Zero-length neighbours count as convex.
#[must_use]
pub fn check_for_convex(prev: &Point2, cur: &Point2, next: &Point2) -> bool {
    let a = cur - prev;
    let b = next - cur;
    let scale = a.norm() * b.norm();
    if scale < TOLERANCE * TOLERANCE {
        return true;
    }
    cross_2d(&a, &b) / scale > -CONVEX_EPS
}

/// Mitred offset of a closed ring, one point per input point.
///
/// Positive `distance` moves each edge to its left (inwards for a
/// counter-clockwise ring). Where consecutive edges are parallel the vertex
/// is moved along the shared normal.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` for fewer than 3 points or a
/// zero-length edge.
pub fn miter_offset(points: &[Point2], distance: f64) -> Result<Vec<Point2>> {
    let n = points.len();
    if n < 3 {
        return Err(OperationError::InvalidInput(
            "at least 3 points are required for a closed offset".to_owned(),
        )
        .into());
    }

    // Offset line of every edge.
    let mut lines = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let dir = segment_direction(&points[i], &points[j])?;
        lines.push(Line2::from_points(&points[i], &points[j])?.offset(distance));
        normals.push(left_normal(dir));
    }

    // Each vertex moves to the crossing of its two neighbouring offset lines.
    Ok((0..n)
        .map(|i| {
            let prev = (i + n - 1) % n;
            lines[prev]
                .intersect(&lines[i])
                .unwrap_or_else(|| points[i] + normals[i] * distance)
        })
        .collect())
}

/// Splits the band between a ring and its offset into one quad per edge.
///
/// Adjacent quads share exactly one corner point, so the quads tile the
/// band without gaps or overlaps.
#[derive(Debug)]
pub struct OffsetPathSplit {
    original: Vec<Point2>,
    offset: Vec<Point2>,
}

impl OffsetPathSplit {
    /// Creates a split of `original` against its point-wise offset image.
    #[must_use]
    pub fn new(original: Vec<Point2>, offset: Vec<Point2>) -> Self {
        Self { original, offset }
    }

    /// Splits `original` against its [`miter_offset`] at `distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset ring cannot be built.
    pub fn from_distance(original: Vec<Point2>, distance: f64) -> Result<Self> {
        let offset = miter_offset(&original, distance)?;
        Ok(Self::new(original, offset))
    }

    #[must_use]
    pub fn offset_ring(&self) -> &[Point2] {
        &self.offset
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the rings differ in length,
    /// have fewer than 3 points, or contain a zero-length edge.
    pub fn execute(&self) -> Result<Vec<SplitSegment>> {
        let n = self.original.len();
        if n < 3 || self.offset.len() != n {
            return Err(OperationError::InvalidInput(format!(
                "expected two rings of equal length >= 3, got {} and {}",
                n,
                self.offset.len()
            ))
            .into());
        }

        let original_lines = Self::edge_lines(&self.original)?;
        let offset_lines = Self::edge_lines(&self.offset)?;
        let flip = is_clockwise(&self.original);

        // Phase A: resolve every corner.
        let corners: Vec<Corner> = (0..n)
            .map(|i| self.corner(i, flip, &original_lines, &offset_lines))
            .collect();

        // Phase B: each edge runs from its start corner to its end corner.
        let mut segments = Vec::with_capacity(n);
        for (i, start) in corners.iter().enumerate() {
            let end = &corners[(i + 1) % n];
            if start.convex != end.convex {
                debug!(
                    edge = i,
                    start = start.convex,
                    end = end.convex,
                    "corner convexity flips"
                );
            }
            let (inner_start, outer_start) = start.outgoing_start;
            let (inner_end, outer_end) = end.incoming_end;
            segments.push(SplitSegment {
                inner: Segment2::new(inner_start, inner_end),
                outer: Segment2::new(outer_start, outer_end),
            });
        }
        Ok(segments)
    }

    fn edge_lines(ring: &[Point2]) -> Result<Vec<Line2>> {
        let n = ring.len();
        let mut lines = Vec::with_capacity(n);
        for i in 0..n {
            let Ok(line) = Line2::from_points(&ring[i], &ring[(i + 1) % n]) else {
                return Err(OperationError::InvalidInput(format!("zero-length edge {i}")).into());
            };
            lines.push(line);
        }
        Ok(lines)
    }

    fn corner(&self, i: usize, flip: bool, original: &[Line2], offset: &[Line2]) -> Corner {
        let n = self.original.len();
        let prev = (i + n - 1) % n;
        let p = self.original[i];
        let q = self.offset[i];
        let convex = check_for_convex(&self.original[prev], &p, &self.original[(i + 1) % n]) != flip;

        let incoming_original = Segment2::new(self.original[prev], p);
        let incoming_offset = Segment2::new(self.offset[prev], q);

        // Convex: the outgoing offset line cuts the incoming original edge.
        // Concave: the outgoing original line cuts the incoming offset edge.
        let crossing = if convex {
            offset[i].intersect_segment(&incoming_original)
        } else {
            original[i].intersect_segment(&incoming_offset)
        };
        let Some((c, _)) = crossing.filter(|_| !original[prev].is_parallel(&original[i])) else {
            return Corner {
                convex,
                incoming_end: (p, q),
                outgoing_start: (p, q),
            };
        };

        if convex {
            Corner {
                convex,
                incoming_end: (c, q),
                outgoing_start: (p, c),
            }
        } else {
            Corner {
                convex,
                incoming_end: (p, c),
                outgoing_start: (c, q),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::points_equal;
    use crate::math::polygon_2d::signed_area_2d;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn hexagon(side: f64) -> Vec<Point2> {
        (0..6)
            .map(|k| {
                let a = f64::from(k) * PI / 3.0;
                p(side * a.cos(), side * a.sin())
            })
            .collect()
    }

    fn quad_area(seg: &SplitSegment) -> f64 {
        signed_area_2d(&seg.quad()).abs()
    }

    fn shared_points(a: &SplitSegment, b: &SplitSegment) -> usize {
        let ends = [a.inner.end, a.outer.end];
        let starts = [b.inner.start, b.outer.start];
        ends.iter()
            .map(|e| starts.iter().filter(|s| points_equal(e, s, 1e-9)).count())
            .sum()
    }

    #[test]
    fn convexity_test() {
        assert!(check_for_convex(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
        assert!(!check_for_convex(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0)));
        // Collinear and degenerate corners are convex.
        assert!(check_for_convex(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)));
        assert!(check_for_convex(&p(0.0, 0.0), &p(0.0, 0.0), &p(2.0, 1.0)));
    }

    #[test]
    fn miter_offset_of_square() {
        let sq = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let out = miter_offset(&sq, -1.0).unwrap();
        assert!(points_equal(&out[0], &p(-1.0, -1.0), 1e-12));
        assert!(points_equal(&out[2], &p(5.0, 5.0), 1e-12));
        let inner = miter_offset(&sq, 1.0).unwrap();
        assert_relative_eq!(signed_area_2d(&inner), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn hexagon_split_shares_one_point_per_corner() {
        let side = 10.0;
        let split = OffsetPathSplit::from_distance(hexagon(side), -0.1 * side).unwrap();
        let segs = split.execute().unwrap();
        assert_eq!(segs.len(), 6);
        for i in 0..6 {
            let j = (i + 1) % 6;
            assert_eq!(shared_points(&segs[i], &segs[j]), 1, "corner {j}");
        }

        let band = signed_area_2d(split.offset_ring()) - signed_area_2d(&hexagon(side));
        let total: f64 = segs.iter().map(quad_area).sum();
        assert_relative_eq!(total, band.abs(), epsilon = 1e-9);
    }

    #[test]
    fn square_split_tiles_band() {
        let sq = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let segs = OffsetPathSplit::from_distance(sq, -1.0).unwrap().execute().unwrap();
        let total: f64 = segs.iter().map(quad_area).sum();
        assert_relative_eq!(total, 20.0, epsilon = 1e-9);
        // Bottom edge runs on to the corner of the right edge's offset line.
        assert!(points_equal(&segs[0].inner.end, &p(5.0, 0.0), 1e-12));
        assert!(points_equal(&segs[1].outer.start, &p(5.0, 0.0), 1e-12));
    }

    #[test]
    fn concave_corner_of_l_shape() {
        let l = vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ];
        let segs = OffsetPathSplit::from_distance(l, -1.0).unwrap().execute().unwrap();
        // Reflex vertex (2, 2): the incoming edge keeps the original corner
        // and both edges meet at (2, 3).
        assert!(points_equal(&segs[2].inner.end, &p(2.0, 2.0), 1e-12));
        assert!(points_equal(&segs[2].outer.end, &p(2.0, 3.0), 1e-12));
        assert!(points_equal(&segs[3].inner.start, &p(2.0, 3.0), 1e-12));
        assert!(points_equal(&segs[3].outer.start, &p(3.0, 3.0), 1e-12));
        let total: f64 = segs.iter().map(quad_area).sum();
        assert_relative_eq!(total, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_input_mirrors_convexity() {
        let mut sq = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        sq.reverse();
        // Left of a clockwise ring is outside, so +1 grows it.
        let segs = OffsetPathSplit::from_distance(sq, 1.0).unwrap().execute().unwrap();
        let total: f64 = segs.iter().map(quad_area).sum();
        assert_relative_eq!(total, 20.0, epsilon = 1e-9);
        for i in 0..4 {
            assert_eq!(shared_points(&segs[i], &segs[(i + 1) % 4]), 1);
        }
    }

    #[test]
    fn mismatched_rings_fail() {
        let split = OffsetPathSplit::new(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
            vec![p(0.0, 0.0), p(1.0, 0.0)],
        );
        assert!(split.execute().is_err());
    }
}
