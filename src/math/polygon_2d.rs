use super::{points_equal, Point2, Vector2, TOLERANCE};
use crate::error::{OperationError, Result};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring winds clockwise.
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> bool {
    signed_area_2d(points) < 0.0
}

/// Signed area and area centroid of a closed ring.
///
/// Returns `None` for rings with (near) zero area.
#[must_use]
pub fn area_centroid(points: &[Point2]) -> Option<(f64, Point2)> {
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE * TOLERANCE {
        return None;
    }
    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let w = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * w;
        cy += (a.y + b.y) * w;
    }
    let k = 1.0 / (6.0 * area);
    Some((area, Point2::new(cx * k, cy * k)))
}

/// Removes consecutive duplicates, including a trailing point equal to the first.
#[must_use]
pub fn dedup_ring(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for pt in points {
        if out.last().is_some_and(|last| points_equal(last, pt, tol)) {
            continue;
        }
        out.push(*pt);
    }
    while out.len() > 1 && out.first().zip(out.last()).is_some_and(|(f, l)| points_equal(f, l, tol)) {
        out.pop();
    }
    out
}

/// Even-odd ray cast of `p` against one closed ring.
///
/// Edges are half-open in y so a ray through a vertex counts once.
#[must_use]
pub fn point_in_ring(p: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(OperationError::InvalidInput(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            a.x, a.y, b.x, b.y
        ))
        .into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&unit_square()) - 1.0).abs() < TOLERANCE);
        assert!(!is_clockwise(&unit_square()));
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
        assert!(is_clockwise(&pts));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[p(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_offset_rectangle() {
        let pts = vec![p(2.0, 1.0), p(6.0, 1.0), p(6.0, 3.0), p(2.0, 3.0)];
        let (area, c) = area_centroid(&pts).unwrap();
        assert!((area - 8.0).abs() < TOLERANCE);
        assert!((c.x - 4.0).abs() < TOLERANCE);
        assert!((c.y - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_collinear_ring_is_none() {
        assert!(area_centroid(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]).is_none());
    }

    #[test]
    fn dedup_removes_consecutive_and_closing_duplicates() {
        let pts = vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 1.0 + 1e-9),
            p(0.0, 0.0),
        ];
        let out = dedup_ring(&pts, TOLERANCE);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn ray_cast_square() {
        let sq = unit_square();
        assert!(point_in_ring(&p(0.5, 0.5), &sq));
        assert!(!point_in_ring(&p(1.5, 0.5), &sq));
        // Ray through the vertex (1, 1) level is counted once.
        assert!(!point_in_ring(&p(-1.0, 1.0), &sq));
    }

    #[test]
    fn segment_direction_zero_length() {
        assert!(segment_direction(&p(1.0, 1.0), &p(1.0, 1.0)).is_err());
        let d = segment_direction(&p(0.0, 0.0), &p(3.0, 4.0)).unwrap();
        assert!((d.x - 0.6).abs() < TOLERANCE);
    }

    #[test]
    fn left_normal_basic() {
        let n = left_normal(Vector2::new(1.0, 0.0));
        assert!(n.x.abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }
}
