use crate::math::{to_2d, Point2, Point3};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a topological vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex. Planar algorithms ignore `z`.
    pub point: Point3,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Creates a vertex on the `z = 0` plane.
    #[must_use]
    pub fn planar(point: Point2) -> Self {
        Self::new(Point3::new(point.x, point.y, 0.0))
    }

    #[must_use]
    pub fn point_2d(&self) -> Point2 {
        to_2d(&self.point)
    }
}
