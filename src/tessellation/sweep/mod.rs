//! Constrained Delaunay triangulation of polygons with holes by an
//! advancing-front sweep line.
//!
//! Points are swept bottom to top in `(y, x)` order. Each point closes a
//! triangle against the advancing front, after which the constrained edges
//! ending at the point are forced into the mesh by edge flips. Interior
//! triangles are found by flooding from the boundary across unconstrained
//! edges.

mod advancing_front;
mod context;
mod events;
mod predicates;
mod triangle;

pub use context::{MeshTriangle, SweepContext, SweepState};
pub use predicates::{in_circle, in_scan_area, orient_2d, Orientation};

/// Collinearity band shared by the orientation and scan-area predicates.
pub const EPSILON: f64 = 1e-12;

/// Margin of the sentinel points, as a fraction of the bounding box size.
pub const ALPHA: f64 = 0.3;
