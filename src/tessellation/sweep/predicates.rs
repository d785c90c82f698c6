use std::f64::consts::FRAC_PI_2;

use super::EPSILON;
use crate::math::Point2;

/// Turn direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Cw,
    Ccw,
    Collinear,
}

/// Orientation of `pa → pb → pc`, collinear inside the `EPSILON` band.
#[must_use]
pub fn orient_2d(pa: &Point2, pb: &Point2, pc: &Point2) -> Orientation {
    let det_left = (pa.x - pc.x) * (pb.y - pc.y);
    let det_right = (pa.y - pc.y) * (pb.x - pc.x);
    let val = det_left - det_right;
    if val > -EPSILON && val < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Ccw
    } else {
        Orientation::Cw
    }
}

/// In-circle determinant of `pd` against the counter-clockwise triangle
/// `pa, pb, pc`.
///
/// `None` when `pd` does not see the edge `pb`–`pc` from outside the
/// triangle, i.e. when `a, b, d` or `c, a, d` do not turn left. Flipping is
/// impossible in that case.
#[must_use]
pub(crate) fn in_circle_det(pa: &Point2, pb: &Point2, pc: &Point2, pd: &Point2) -> Option<f64> {
    let adx = pa.x - pd.x;
    let ady = pa.y - pd.y;
    let bdx = pb.x - pd.x;
    let bdy = pb.y - pd.y;

    let oabd = adx * bdy - bdx * ady;
    if oabd <= 0.0 {
        return None;
    }

    let cdx = pc.x - pd.x;
    let cdy = pc.y - pd.y;

    let ocad = cdx * ady - adx * cdy;
    if ocad <= 0.0 {
        return None;
    }

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    Some(alift * (bdx * cdy - cdx * bdy) + blift * ocad + clift * oabd)
}

/// Returns `true` if `pd` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `pa, pb, pc`.
#[must_use]
pub fn in_circle(pa: &Point2, pb: &Point2, pc: &Point2, pd: &Point2) -> bool {
    in_circle_det(pa, pb, pc, pd).is_some_and(|det| det > 0.0)
}

/// Returns `true` if `pd` lies in the open wedge at `pa` spanned by `pb`
/// and `pc`, so that the edge `pb`–`pc` can be flipped towards it.
#[must_use]
pub fn in_scan_area(pa: &Point2, pb: &Point2, pc: &Point2, pd: &Point2) -> bool {
    let oadb = (pa.x - pb.x) * (pd.y - pb.y) - (pd.x - pb.x) * (pa.y - pb.y);
    if oadb >= -EPSILON {
        return false;
    }
    let oadc = (pa.x - pc.x) * (pd.y - pc.y) - (pd.x - pc.x) * (pa.y - pc.y);
    oadc > EPSILON
}

/// Signed angle at `origin` from `pa` to `pb`, in `(-π, π]`.
pub(super) fn angle(origin: &Point2, pa: &Point2, pb: &Point2) -> f64 {
    let (ax, ay) = (pa.x - origin.x, pa.y - origin.y);
    let (bx, by) = (pb.x - origin.x, pb.y - origin.y);
    (ax * by - ay * bx).atan2(ax * bx + ay * by)
}

pub(super) fn angle_exceeds_90_degrees(origin: &Point2, pa: &Point2, pb: &Point2) -> bool {
    let a = angle(origin, pa, pb);
    a > FRAC_PI_2 || a < -FRAC_PI_2
}

pub(super) fn angle_exceeds_plus_90_degrees_or_is_negative(
    origin: &Point2,
    pa: &Point2,
    pb: &Point2,
) -> bool {
    let a = angle(origin, pa, pb);
    a > FRAC_PI_2 || a < 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn orientation_signs() {
        assert_eq!(orient_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)), Orientation::Ccw);
        assert_eq!(orient_2d(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)), Orientation::Cw);
        assert_eq!(
            orient_2d(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)),
            Orientation::Collinear
        );
        // Inside the epsilon band.
        assert_eq!(
            orient_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 1e-13)),
            Orientation::Collinear
        );
    }

    #[test]
    fn in_circle_of_unit_triangle() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(!in_circle(&a, &b, &c, &p(2.0, 2.0)));
        // Circumcircle centre (0.5, 0.5), radius ~0.707; the point across
        // edge b-c at (0.8, 0.8) is inside.
        assert!(in_circle(&a, &b, &c, &p(0.8, 0.8)));
        // The fourth corner of the square is cocircular.
        assert!(!in_circle(&a, &b, &c, &p(1.0, 1.0)));
    }

    #[test]
    fn in_circle_guard_rejects_non_convex_quad() {
        // d sits beside edge a-b, so the quad a, b, d, c is not convex.
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(in_circle_det(&a, &b, &c, &p(0.5, -0.1)).is_none());
    }

    #[test]
    fn scan_area_wedge() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 1.0), p(-1.0, 1.0));
        assert!(in_scan_area(&a, &b, &c, &p(0.0, 2.0)));
        assert!(!in_scan_area(&a, &b, &c, &p(3.0, 1.0)));
        assert!(!in_scan_area(&a, &b, &c, &p(0.0, -2.0)));
    }

    #[test]
    fn signed_angle() {
        let o = p(0.0, 0.0);
        assert!((angle(&o, &p(1.0, 0.0), &p(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!(angle(&o, &p(0.0, 1.0), &p(1.0, 0.0)) < 0.0);
        assert!(angle_exceeds_90_degrees(&o, &p(1.0, 0.0), &p(-1.0, 0.1)));
        assert!(angle_exceeds_plus_90_degrees_or_is_negative(
            &o,
            &p(1.0, 0.0),
            &p(1.0, -0.1)
        ));
    }
}
