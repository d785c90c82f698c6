use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{angle_in_arc_range, point_to_arc_dist};
use crate::math::{Point2, Vector2, ANGLE_TOLERANCE, TOLERANCE};

/// A circular arc in the plane.
///
/// The arc runs from `start_angle` to `end_angle` around `center`,
/// counter-clockwise unless `clockwise` is set. Angles are in radians and
/// are not normalised; equal angles modulo a full turn with distinct raw
/// values describe a full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc2d {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

impl Arc2d {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive or
    /// the angular span is empty.
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> Result<Self> {
        let arc = Self {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        };
        arc.check()?;
        Ok(arc)
    }

    /// Arc around `center` from `start` to `end`.
    ///
    /// Coincident end points give a full circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the end points are not
    /// equidistant from the center or the radius is zero.
    pub fn from_center_points(
        center: Point2,
        start: &Point2,
        end: &Point2,
        clockwise: bool,
    ) -> Result<Self> {
        let r0 = (start - center).norm();
        let r1 = (end - center).norm();
        if (r0 - r1).abs() > TOLERANCE.max(r0 * 1e-9) {
            return Err(GeometryError::Degenerate(format!(
                "arc end points at radii {r0} and {r1}"
            ))
            .into());
        }
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let mut end_angle = (end.y - center.y).atan2(end.x - center.x);
        if (start - end).norm() < TOLERANCE {
            end_angle = if clockwise {
                start_angle - TAU
            } else {
                start_angle + TAU
            };
        }
        Self::new(center, r0, start_angle, end_angle, clockwise)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.radius.is_nan() || self.radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc radius {} must be positive",
                self.radius
            ))
            .into());
        }
        if self.sweep().abs() < ANGLE_TOLERANCE {
            return Err(GeometryError::Degenerate("arc with empty angular span".into()).into());
        }
        Ok(())
    }

    /// Signed angular span: positive counter-clockwise, negative clockwise.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        let span = if self.clockwise {
            (-raw).rem_euclid(TAU)
        } else {
            raw.rem_euclid(TAU)
        };
        let span = if (span < ANGLE_TOLERANCE || TAU - span < ANGLE_TOLERANCE)
            && raw.abs() > ANGLE_TOLERANCE
        {
            TAU
        } else {
            span
        };
        if self.clockwise {
            -span
        } else {
            span
        }
    }

    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        (self.sweep().abs() - TAU).abs() < ANGLE_TOLERANCE
    }

    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep())
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    /// Point at normalised parameter `t` (0 = start, 1 = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.point_at_angle(self.start_angle + t * self.sweep())
    }

    /// Unit tangent at `angle` in the direction of travel.
    #[must_use]
    pub fn tangent_at_angle(&self, angle: f64) -> Vector2 {
        let sign = self.sweep().signum();
        Vector2::new(-angle.sin(), angle.cos()) * sign
    }

    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        point_to_arc_dist(p, &self.center, self.radius, self.start_angle, self.sweep())
    }

    /// Number of chords keeping the sagitta under `tolerance` and each chord
    /// no longer than `max_segment_length`.
    #[must_use]
    pub fn segment_count(&self, tolerance: f64, max_segment_length: Option<f64>) -> usize {
        let mut n = arc_subdivision_count(self.radius, self.sweep().abs(), tolerance);
        if let Some(max) = max_segment_length.filter(|m| *m > 0.0) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let by_length = (self.length() / max).ceil() as usize;
            n = n.max(by_length);
        }
        n.max(1)
    }

    /// Crossings of the horizontal line at height `y`.
    ///
    /// Tangent contacts are skipped. An end point on the line is reported
    /// only when the arc leaves it upwards, matching the half-open rule of
    /// straight segments.
    #[must_use]
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2> {
        let dy = y - self.center.y;
        if dy.abs() >= self.radius * (1.0 - 1e-12) {
            return Vec::new();
        }
        let sweep = self.sweep();
        let sign = sweep.signum();
        let base = (dy / self.radius).asin();
        let end_angle = self.start_angle + sweep;

        let mut hits = Vec::with_capacity(2);
        for angle in [base, PI - base] {
            let at_start = angles_close(angle, self.start_angle);
            let at_end = angles_close(angle, end_angle);
            let counted = if at_start || at_end {
                // A full circle has its seam at both ends; count it once.
                let leaves_up = at_start && sign * self.start_angle.cos() > 0.0;
                let arrives_from_up = at_end && -sign * end_angle.cos() > 0.0;
                if self.is_full_circle() {
                    true
                } else {
                    leaves_up || arrives_from_up
                }
            } else {
                angle_in_arc_range(angle, self.start_angle, sweep)
            };
            if counted {
                let x = self.center.x + self.radius * angle.cos();
                hits.push(Point2::new(x, y));
            }
        }
        hits
    }

    /// Twice the signed area swept from the origin along the arc.
    #[must_use]
    pub fn shoelace_term(&self) -> f64 {
        let (cx, cy, r) = (self.center.x, self.center.y, self.radius);
        let sweep = self.sweep();
        let (t0, t1) = (self.start_angle, self.start_angle + sweep);
        r * cx * (t1.sin() - t0.sin()) - r * cy * (t1.cos() - t0.cos()) + r * r * sweep
    }

    /// Portion of the arc between parameters `t0 < t1` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for an invalid range.
    pub fn sub_arc(&self, t0: f64, t1: f64) -> Result<Self> {
        check_sub_range(t0, t1)?;
        let sweep = self.sweep();
        Ok(Self {
            start_angle: self.start_angle + t0 * sweep,
            end_angle: self.start_angle + t1 * sweep,
            ..*self
        })
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        let sweep = self.sweep();
        Self {
            start_angle: self.start_angle + sweep,
            end_angle: self.start_angle,
            clockwise: !self.clockwise,
            ..*self
        }
    }

    /// Axis-aligned bounds including any quadrant extremes inside the span.
    #[must_use]
    pub fn bounding_box(&self) -> (Point2, Point2) {
        let s = self.start_point();
        let e = self.end_point();
        let mut min = Point2::new(s.x.min(e.x), s.y.min(e.y));
        let mut max = Point2::new(s.x.max(e.x), s.y.max(e.y));
        let sweep = self.sweep();
        for k in 0..4 {
            let angle = f64::from(k) * FRAC_PI_2;
            if angle_in_arc_range(angle, self.start_angle, sweep) {
                let q = self.point_at_angle(angle);
                min = Point2::new(min.x.min(q.x), min.y.min(q.y));
                max = Point2::new(max.x.max(q.x), max.y.max(q.y));
            }
        }
        (min, max)
    }
}

pub(super) fn check_sub_range(t0: f64, t1: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&t0) {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "t0",
            value: t0,
            min: 0.0,
            max: 1.0,
        }
        .into());
    }
    if !(t0..=1.0).contains(&t1) || t1 - t0 < ANGLE_TOLERANCE {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "t1",
            value: t1,
            min: t0,
            max: 1.0,
        }
        .into());
    }
    Ok(())
}

fn angles_close(a: f64, b: f64) -> bool {
    let d = (a - b).rem_euclid(TAU);
    d < ANGLE_TOLERANCE || TAU - d < ANGLE_TOLERANCE
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> usize {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // Sagitta s = r * (1 - cos(θ/2)), solved for the largest θ with s <= tolerance.
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as usize;
    n.max(1)
}
