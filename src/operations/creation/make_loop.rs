use tracing::debug;

use crate::error::{OperationError, Result, TopologyError};
use crate::geometry::{Curve2d, PolyCurve2d};
use crate::math::{Point3, TOLERANCE};
use crate::topology::edge::DEFAULT_EDGE_TOLERANCE;
use crate::topology::{EdgeData, LoopId, TopologyStore, VertexData, VertexId};

enum LoopSource {
    Points(Vec<Point3>),
    Curves(PolyCurve2d),
}

/// Creates a closed loop of vertices, edges and co-edges.
pub struct MakeLoop {
    source: LoopSource,
    tolerance: f64,
    edge_tolerance: f64,
}

impl MakeLoop {
    /// Loop of straight edges through `points`.
    ///
    /// The loop closes itself; do not repeat the first point at the end.
    #[must_use]
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self {
            source: LoopSource::Points(points),
            tolerance: TOLERANCE,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }

    /// Loop with one edge per curve of a closed chain.
    #[must_use]
    pub fn from_poly_curve(curves: PolyCurve2d) -> Self {
        Self {
            source: LoopSource::Curves(curves),
            tolerance: TOLERANCE,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }

    /// Distance under which consecutive points are merged.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Chordal tolerance stored on the created edges.
    #[must_use]
    pub fn with_edge_tolerance(mut self, tolerance: f64) -> Self {
        self.edge_tolerance = tolerance;
        self
    }

    /// Executes the operation, creating the loop in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DegenerateLoop` if fewer than 3 distinct points
    /// remain after dropping consecutive duplicates, or
    /// `OperationError::InvalidInput` if a curve chain is not closed.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<LoopId> {
        match &self.source {
            LoopSource::Points(points) => self.build_from_points(points, store),
            LoopSource::Curves(curves) => self.build_from_curves(curves, store),
        }
    }

    fn build_from_points(&self, points: &[Point3], store: &mut TopologyStore) -> Result<LoopId> {
        let mut ring: Vec<Point3> = Vec::with_capacity(points.len());
        for pt in points {
            if ring.last().is_some_and(|last| (last - pt).norm() < self.tolerance) {
                continue;
            }
            ring.push(*pt);
        }
        while ring.len() > 1
            && ring
                .first()
                .zip(ring.last())
                .is_some_and(|(f, l)| (f - l).norm() < self.tolerance)
        {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(TopologyError::DegenerateLoop(ring.len()).into());
        }

        let vertices: Vec<VertexId> = ring
            .iter()
            .map(|p| store.add_vertex(VertexData::new(*p)))
            .collect();
        let n = vertices.len();
        let edges = (0..n)
            .map(|i| {
                EdgeData::line(vertices[i], vertices[(i + 1) % n])
                    .with_tolerance(self.edge_tolerance)
            })
            .collect();
        let lp = link_edges(store, edges)?;
        debug!(?lp, edges = n, dropped = points.len() - n, "created loop from points");
        Ok(lp)
    }

    fn build_from_curves(&self, curves: &PolyCurve2d, store: &mut TopologyStore) -> Result<LoopId> {
        if !curves.validate(self.tolerance) {
            return Err(OperationError::InvalidInput("curve chain is not closed".into()).into());
        }
        let n = curves.len();
        let vertices: Vec<VertexId> = curves
            .curves()
            .iter()
            .map(|c| store.add_vertex(VertexData::planar(c.start_point())))
            .collect();
        let edges = curves
            .curves()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (start, end) = (vertices[i], vertices[(i + 1) % n]);
                let edge = match c {
                    Curve2d::Line(_) => EdgeData::line(start, end),
                    Curve2d::Arc(a) => EdgeData::arc(start, end, a.center, a.clockwise),
                };
                edge.with_tolerance(self.edge_tolerance)
            })
            .collect();
        let lp = link_edges(store, edges)?;
        debug!(?lp, edges = n, "created loop from curves");
        Ok(lp)
    }
}

/// Inserts the edges and chains one forward co-edge per edge into a new loop.
fn link_edges(store: &mut TopologyStore, edges: Vec<EdgeData>) -> Result<LoopId> {
    let lp = store.add_loop();
    for data in edges {
        let edge = store.add_edge(data)?;
        let coedge = store.add_coedge(edge, false)?;
        store.append_coedge(lp, coedge, None)?;
    }
    Ok(lp)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Arc2d;
    use crate::math::Point2;
    use crate::BrepError;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square() -> Vec<Point3> {
        vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]
    }

    #[test]
    fn square_loop_is_circular() {
        let mut store = TopologyStore::new();
        let lp = MakeLoop::from_points(square()).execute(&mut store).unwrap();
        let data = *store.loop_data(lp).unwrap();
        assert_eq!(data.count, 4);

        // Walking next from the root returns to it in exactly `count` steps.
        let root = data.root.unwrap();
        let mut current = root;
        for step in 0..data.count {
            if step > 0 {
                assert_ne!(current, root);
            }
            let c = store.coedge(current).unwrap();
            assert_eq!(store.coedge(c.next).unwrap().prev, current);
            current = c.next;
        }
        assert_eq!(current, root);
        assert!(store.validate_loop(lp, false));
    }

    #[test]
    fn duplicate_points_are_dropped() {
        let mut store = TopologyStore::new();
        let pts = vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 0.0),
        ];
        let lp = MakeLoop::from_points(pts).execute(&mut store).unwrap();
        assert_eq!(store.loop_data(lp).unwrap().count, 4);
        assert_eq!(store.vertex_count(), 4);
    }

    #[test]
    fn too_few_points_fail() {
        let mut store = TopologyStore::new();
        let err = MakeLoop::from_points(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)])
            .execute(&mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            BrepError::Topology(TopologyError::DegenerateLoop(2))
        ));
    }

    #[test]
    fn loop_from_curves_keeps_arcs() {
        // Rectangle with a half-disc cap on the right.
        let curves = PolyCurve2d::new(vec![
            Curve2d::line(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)).unwrap(),
            Arc2d::new(Point2::new(4.0, 1.0), 1.0, -PI / 2.0, PI / 2.0, false)
                .unwrap()
                .into(),
            Curve2d::line(Point2::new(4.0, 2.0), Point2::new(0.0, 2.0)).unwrap(),
            Curve2d::line(Point2::new(0.0, 2.0), Point2::new(0.0, 0.0)).unwrap(),
        ]);
        let mut store = TopologyStore::new();
        let lp = MakeLoop::from_poly_curve(curves.clone())
            .execute(&mut store)
            .unwrap();
        assert!(store.validate_loop(lp, true));
        let back = store.loop_curves(lp).unwrap();
        assert!(back.is_same_poly_curve(&curves, 1e-9));
        assert!(!store.is_clockwise(lp).unwrap());
    }

    #[test]
    fn open_curve_chain_fails() {
        let curves = PolyCurve2d::new(vec![
            Curve2d::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap(),
            Curve2d::line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)).unwrap(),
        ]);
        let mut store = TopologyStore::new();
        assert!(MakeLoop::from_poly_curve(curves).execute(&mut store).is_err());
    }
}
