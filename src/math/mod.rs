pub mod distance_2d;
pub mod intersect_2d;
pub mod line;
pub mod polygon_2d;
pub mod segment;

pub use line::Line2;
pub use segment::Segment2;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default geometric tolerance for point coincidence and on-curve tests.
pub const TOLERANCE: f64 = 1e-6;

/// Angular tolerance (radians) used when comparing arc angles.
pub const ANGLE_TOLERANCE: f64 = 1e-9;

/// Returns `true` if the two points are closer than `tol`.
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a - b).norm() < tol
}

/// Z component of the cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Drops the z coordinate.
#[must_use]
pub fn to_2d(p: &Point3) -> Point2 {
    Point2::new(p.x, p.y)
}
