use crate::error::Result;
use crate::topology::{EdgeId, TopologyStore};

use super::{Polyline, TessellationParams};

/// Tessellates an edge into a polyline.
pub struct TessellateCurve {
    edge: EdgeId,
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(edge: EdgeId, params: TessellationParams) -> Self {
        Self { edge, params }
    }

    /// Executes the tessellation, returning a polyline from the edge's start
    /// vertex to its end vertex.
    ///
    /// The finer of the edge's own tolerance and the parameter tolerance
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the edge or its
    /// vertices are missing, or the edge curve is degenerate.
    pub fn execute(&self, store: &TopologyStore) -> Result<Polyline> {
        self.params.check()?;
        let edge = store.edge(self.edge)?;
        let start = store.vertex(edge.start)?.point_2d();
        let end = store.vertex(edge.end)?.point_2d();
        let curve = edge.to_curve(start, end)?;

        let mut params = self.params;
        if edge.tolerance > 0.0 {
            params.tolerance = params.tolerance.min(edge.tolerance);
        }
        Ok(Polyline {
            points: curve.discrete_n(params.segment_count(&curve)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;
    use crate::topology::{EdgeData, VertexData};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_edge_is_a_single_segment() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::planar(p(0.0, 0.0)));
        let b = store.add_vertex(VertexData::planar(p(3.0, 4.0)));
        let e = store.add_edge(EdgeData::line(a, b)).unwrap();

        let line = TessellateCurve::new(e, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(line.points, vec![p(0.0, 0.0), p(3.0, 4.0)]);
    }

    #[test]
    fn long_line_respects_max_segment_length() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::planar(p(0.0, 0.0)));
        let b = store.add_vertex(VertexData::planar(p(10.0, 0.0)));
        let e = store.add_edge(EdgeData::line(a, b)).unwrap();

        let params = TessellationParams::default().with_max_segment_length(2.5);
        let line = TessellateCurve::new(e, params).execute(&store).unwrap();
        assert_eq!(line.points.len(), 5);
        assert_relative_eq!(line.points[1].x, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn arc_edge_stays_on_circle() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::planar(p(1.0, 0.0)));
        let b = store.add_vertex(VertexData::planar(p(-1.0, 0.0)));
        let e = store
            .add_edge(EdgeData::arc(a, b, Point2::origin(), false).with_tolerance(1e-3))
            .unwrap();

        let line = TessellateCurve::new(e, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert!(line.points.len() > 5);
        assert_relative_eq!(line.points[0], p(1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(*line.points.last().unwrap(), p(-1.0, 0.0), epsilon = 1e-12);
        for q in &line.points {
            assert_relative_eq!(q.coords.norm(), 1.0, epsilon = 1e-12);
            assert!(q.y >= -1e-12);
        }
    }

    #[test]
    fn missing_edge_is_an_error() {
        let mut other = TopologyStore::new();
        let a = other.add_vertex(VertexData::planar(p(0.0, 0.0)));
        let b = other.add_vertex(VertexData::planar(p(1.0, 0.0)));
        let e = other.add_edge(EdgeData::line(a, b)).unwrap();
        let store = TopologyStore::new();
        assert!(TessellateCurve::new(e, TessellationParams::default())
            .execute(&store)
            .is_err());
    }
}
