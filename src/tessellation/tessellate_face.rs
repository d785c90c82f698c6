use tracing::debug;

use crate::error::Result;
use crate::operations::query::ClipPolygon;
use crate::topology::{FaceId, TopologyStore};

use super::{TessellatePolygon, TessellationParams, TriangleMesh2d};

/// Tessellates a face into a triangle mesh.
pub struct TessellateFace {
    face: FaceId,
    params: TessellationParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: TessellationParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// Loop winding is normalised first, so the triangles always come out
    /// counter-clockwise. Invalid inner loops are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its outer loop is invalid, or the
    /// region cannot be triangulated.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh2d> {
        let polygon = ClipPolygon::new(self.face).execute(store)?;
        debug!(face = ?self.face, holes = polygon.holes.len(), "tessellating face");
        TessellatePolygon::new(polygon, self.params).execute()
    }
}
