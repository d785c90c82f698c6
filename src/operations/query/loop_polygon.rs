use crate::error::Result;
use crate::math::polygon_2d::dedup_ring;
use crate::math::{Point2, Point3, TOLERANCE};
use crate::topology::{LoopId, TopologyStore};

/// Flattens a loop into point rings.
pub struct LoopPolygon {
    lp: LoopId,
    close_path: bool,
}

impl LoopPolygon {
    /// Creates a new `LoopPolygon` query. Rings come back closed unless
    /// [`Self::closed`] turns that off.
    #[must_use]
    pub fn new(lp: LoopId) -> Self {
        Self {
            lp,
            close_path: true,
        }
    }

    /// Whether the first point is repeated at the end of the ring.
    #[must_use]
    pub fn closed(mut self, close_path: bool) -> Self {
        self.close_path = close_path;
        self
    }

    /// Vertex positions in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt.
    pub fn to_polygon(&self, store: &TopologyStore) -> Result<Vec<Point3>> {
        let mut points = store.loop_points(self.lp)?;
        if self.close_path {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
        }
        Ok(points)
    }

    /// Ring with arc edges discretised using each edge's tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt or holds degenerate edges.
    pub fn to_discrete_polygon(&self, store: &TopologyStore) -> Result<Vec<Point2>> {
        let mut ring: Vec<Point2> = Vec::new();
        for id in store.loop_coedges(self.lp)? {
            let tolerance = store.edge(store.coedge(id)?.edge)?.tolerance;
            let pts = store.coedge_curve(id)?.discrete(tolerance, None);
            // Each curve starts where the previous one ended.
            ring.extend_from_slice(&pts[..pts.len() - 1]);
        }
        let mut ring = dedup_ring(&ring, TOLERANCE);
        if self.close_path {
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
        }
        Ok(ring)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc2d, Curve2d, PolyCurve2d};
    use crate::operations::creation::MakeLoop;
    use std::f64::consts::PI;

    #[test]
    fn closed_polygon_repeats_first_point() {
        let mut store = TopologyStore::new();
        let lp = MakeLoop::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .execute(&mut store)
        .unwrap();
        let closed = LoopPolygon::new(lp).to_polygon(&store).unwrap();
        assert_eq!(closed.len(), 4);
        assert_eq!(closed[0], closed[3]);
        let open = LoopPolygon::new(lp).closed(false).to_polygon(&store).unwrap();
        assert_eq!(open.len(), 3);
        assert_eq!(open[..], closed[..3]);
    }

    #[test]
    fn arc_edges_are_discretised() {
        let p = Point2::new;
        let curves = PolyCurve2d::new(vec![
            Curve2d::line(p(-1.0, 0.0), p(1.0, 0.0)).unwrap(),
            Arc2d::new(p(0.0, 0.0), 1.0, 0.0, PI / 2.0, false).unwrap().into(),
            Arc2d::new(p(0.0, 0.0), 1.0, PI / 2.0, PI, false).unwrap().into(),
        ]);
        let mut store = TopologyStore::new();
        let lp = MakeLoop::from_poly_curve(curves)
            .with_edge_tolerance(0.001)
            .execute(&mut store)
            .unwrap();
        let ring = LoopPolygon::new(lp).to_discrete_polygon(&store).unwrap();
        assert!(ring.len() > 20, "len={}", ring.len());
        assert_eq!(ring.first(), ring.last());
        for q in &ring[1..] {
            assert!(q.y >= -1e-12);
        }
        let open = LoopPolygon::new(lp)
            .closed(false)
            .to_discrete_polygon(&store)
            .unwrap();
        assert_eq!(open.len(), ring.len() - 1);
    }
}
