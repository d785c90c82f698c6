use std::f64::consts::TAU;

use super::{cross_2d, Point2, Vector2};

/// Threshold below which two directions are treated as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// Parameter slack applied at segment and arc ends.
const PARAM_EPS: f64 = 1e-9;

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < PARALLEL_EPS {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    if (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t) && (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&u) {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of a line segment with a circular arc.
///
/// The arc has `center`, `radius`, `start_angle` and signed `sweep`
/// (positive = counter-clockwise).
///
/// Returns `(point, t_seg, t_arc)` with both parameters in `[0, 1]`.
#[must_use]
pub fn line_arc_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if radius < PARALLEL_EPS || sweep.abs() < PARALLEL_EPS {
        return results;
    }

    let d = a1 - a0;
    let seg_len_sq = d.norm_squared();
    if seg_len_sq < PARALLEL_EPS * PARALLEL_EPS {
        return results;
    }

    // Substitute the parametric segment into the circle equation.
    let f = a0 - center;
    let a = seg_len_sq;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -PARAM_EPS * a {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let t_roots = if disc_sqrt < PARAM_EPS {
        // Tangent case: single root.
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    for t_seg in t_roots {
        if !(-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t_seg) {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        let p = a0 + d * t_seg;
        let angle = (p.y - center.y).atan2(p.x - center.x);
        if let Some(t_arc) = angle_to_arc_param(angle, start_angle, sweep) {
            results.push((p, t_seg, t_arc));
        }
    }

    results
}

/// Intersection of two circular arcs.
///
/// Returns `(point, t1, t2)` where `t1` and `t2` are arc parameters in `[0, 1]`.
#[must_use]
pub fn arc_arc_intersect_2d(
    c1: &Point2,
    r1: f64,
    start1: f64,
    sweep1: f64,
    c2: &Point2,
    r2: f64,
    start2: f64,
    sweep2: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if r1 < PARALLEL_EPS || r2 < PARALLEL_EPS {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < PARALLEL_EPS {
        // Concentric circles: no isolated intersection points.
        return results;
    }

    let tol = PARAM_EPS * (r1 + r2).max(1.0);
    if dist > r1 + r2 + tol || dist < (r1 - r2).abs() - tol {
        return results;
    }

    // Distance from c1 along c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let mid = c1 + delta * (a / dist);
    let perp = Vector2::new(-delta.y, delta.x) / dist;

    let candidates = if h < tol {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    for p in candidates {
        let angle1 = (p.y - c1.y).atan2(p.x - c1.x);
        let angle2 = (p.y - c2.y).atan2(p.x - c2.x);
        if let (Some(t1), Some(t2)) = (
            angle_to_arc_param(angle1, start1, sweep1),
            angle_to_arc_param(angle2, start2, sweep2),
        ) {
            results.push((p, t1, t2));
        }
    }

    results
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    let eps = PARAM_EPS;
    if sweep.abs() < PARALLEL_EPS {
        return None;
    }

    // Angular offset from start_angle in the sweep direction.
    let mut delta = (angle - start_angle).rem_euclid(TAU);
    if sweep < 0.0 {
        delta -= TAU;
        if delta < -TAU + eps {
            delta += TAU;
        }
    } else if delta > TAU - eps {
        delta -= TAU;
    }

    let t = delta / sweep;
    if (-eps..=1.0 + eps).contains(&t) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}
