use std::f64::consts::TAU;

use super::Point2;

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        return (p - a).norm();
    }

    // Project onto the supporting line, clamp to the segment.
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Returns the minimum distance from `p` to a circular arc.
///
/// The arc is given by `center`, `radius`, `start_angle` and signed `sweep`.
/// Inside the angular range the distance is radial; outside it is the
/// distance to the nearer end point.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let d = p - center;
    let angle = d.y.atan2(d.x);
    if angle_in_arc_range(angle, start_angle, sweep) {
        return (d.norm() - radius).abs();
    }

    let end_angle = start_angle + sweep;
    let e0 = Point2::new(
        center.x + radius * start_angle.cos(),
        center.y + radius * start_angle.sin(),
    );
    let e1 = Point2::new(
        center.x + radius * end_angle.cos(),
        center.y + radius * end_angle.sin(),
    );
    (p - e0).norm().min((p - e1).norm())
}

/// Checks if an angle falls within an arc's angular range.
#[must_use]
pub fn angle_in_arc_range(angle: f64, start_angle: f64, sweep: f64) -> bool {
    let eps = 1e-10;
    if sweep.abs() >= TAU - eps {
        return true;
    }
    if sweep >= 0.0 {
        let delta = (angle - start_angle).rem_euclid(TAU);
        delta <= sweep + eps || delta >= TAU - eps
    } else {
        let delta = (start_angle - angle).rem_euclid(TAU);
        delta <= -sweep + eps || delta >= TAU - eps
    }
}
