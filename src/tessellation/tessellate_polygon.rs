use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::{DiscretePolygon, Polygon2d};
use crate::math::Point2;

use super::sweep::SweepContext;
use super::validate::find_ring_crossing;
use super::{TessellationParams, TriangleMesh2d};

enum PolygonSource {
    Curves(Polygon2d),
    Rings(DiscretePolygon),
}

/// Triangulates a polygon with holes.
pub struct TessellatePolygon {
    source: PolygonSource,
    steiner: Vec<Point2>,
    params: TessellationParams,
}

impl TessellatePolygon {
    /// Tessellates a curve-bounded polygon; arcs are flattened with `params`.
    #[must_use]
    pub fn new(polygon: Polygon2d, params: TessellationParams) -> Self {
        Self {
            source: PolygonSource::Curves(polygon),
            steiner: Vec::new(),
            params,
        }
    }

    /// Tessellates already discretised rings.
    #[must_use]
    pub fn from_rings(rings: DiscretePolygon, params: TessellationParams) -> Self {
        Self {
            source: PolygonSource::Rings(rings),
            steiner: Vec::new(),
            params,
        }
    }

    /// Extra vertices inside the polygon that the mesh must use.
    #[must_use]
    pub fn with_steiner_points(mut self, points: Vec<Point2>) -> Self {
        self.steiner = points;
        self
    }

    /// Executes the tessellation.
    ///
    /// Mesh vertices are the outer ring, then each hole, then the Steiner
    /// points, in input order.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` for bad parameters,
    /// `IntersectingConstraints` when `validate_input` finds crossing
    /// edges, or any error of the sweep triangulator.
    pub fn execute(&self) -> Result<TriangleMesh2d> {
        self.params.check()?;
        let rings = match &self.source {
            PolygonSource::Curves(polygon) => {
                let flatten = |ring: &crate::geometry::PolyCurve2d| {
                    ring.discrete_with(|c| self.params.segment_count(c))
                };
                DiscretePolygon {
                    outer: flatten(&polygon.outer),
                    holes: polygon.holes.iter().map(flatten).collect(),
                }
            }
            PolygonSource::Rings(rings) => rings.clone(),
        };

        if self.params.validate_input {
            let mut all: Vec<&[Point2]> = vec![rings.outer.as_slice()];
            all.extend(rings.holes.iter().map(Vec::as_slice));
            if let Some(at) = find_ring_crossing(&all) {
                return Err(TessellationError::IntersectingConstraints { x: at.x, y: at.y }.into());
            }
        }

        let mut ctx =
            SweepContext::new(&rings.outer)?.restore_delaunay(self.params.restore_delaunay);
        for hole in &rings.holes {
            ctx.add_hole(hole)?;
        }
        for p in &self.steiner {
            ctx.add_point(*p)?;
        }
        let triangles = ctx.triangulate()?;

        let mut vertices = rings.outer;
        for hole in rings.holes {
            vertices.extend(hole);
        }
        vertices.extend_from_slice(&self.steiner);

        let mut indices = Vec::with_capacity(triangles.len());
        for tri in &triangles {
            let mut out = [0u32; 3];
            for (slot, &i) in out.iter_mut().zip(&tri.indices) {
                *slot = u32::try_from(i).map_err(|_| {
                    TessellationError::Failed(format!("vertex index {i} exceeds u32"))
                })?;
            }
            indices.push(out);
        }
        debug!(
            vertices = vertices.len(),
            triangles = indices.len(),
            "tessellated polygon"
        );
        Ok(TriangleMesh2d { vertices, indices })
    }
}
