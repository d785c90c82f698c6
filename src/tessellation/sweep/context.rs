use slotmap::SlotMap;
use tracing::debug;

use super::advancing_front::{AdvancingFront, Node, NodeId};
use super::predicates::in_circle_det;
use super::triangle::{Triangle, TriangleId};
use super::{ALPHA, EPSILON};
use crate::error::{Result, TessellationError};
use crate::math::Point2;

/// Lifecycle of a [`SweepContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// Rings and points may still be added.
    Constructed,
    /// Points sorted and sentinels placed.
    Initialized,
    /// Every point and constrained edge has been processed.
    Swept,
    /// Interior triangles are known.
    Finalized,
}

/// A triangle of the finished mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    /// Corner positions, counter-clockwise.
    pub points: [Point2; 3],
    /// Corner indices in insertion order (outer ring, then holes, then
    /// Steiner points). The two indices past the input refer to the
    /// sentinel points and only occur on exterior triangles.
    pub indices: [usize; 3],
    pub is_interior: bool,
}

#[derive(Debug, Clone)]
pub(super) struct SweepPoint {
    pub p: Point2,
    /// Constrained edges whose upper end is this point.
    pub edges: Vec<usize>,
}

/// Constrained edge with `p` below `q` in `(y, x)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SweepEdge {
    pub p: usize,
    pub q: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Basin {
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub width: f64,
    pub left_highest: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct EdgeEvent {
    pub edge: Option<SweepEdge>,
    pub right: bool,
}

/// Sweep-line triangulation of one polygon with holes.
///
/// ```ignore
/// let mut ctx = SweepContext::new(&outer)?;
/// ctx.add_hole(&hole)?;
/// let triangles = ctx.triangulate()?;
/// ```
#[derive(Debug)]
pub struct SweepContext {
    pub(super) points: Vec<SweepPoint>,
    pub(super) edges: Vec<SweepEdge>,
    pub(super) triangles: SlotMap<TriangleId, Triangle>,
    pub(super) nodes: SlotMap<NodeId, Node>,
    pub(super) front: Option<AdvancingFront>,
    pub(super) basin: Basin,
    pub(super) edge_event: EdgeEvent,
    /// Input points sorted by `(y, x)`.
    pub(super) order: Vec<usize>,
    interior: Vec<TriangleId>,
    input_count: usize,
    hole_count: usize,
    state: SweepState,
    restore_delaunay: bool,
}

impl SweepContext {
    /// Starts a triangulation of the closed ring `outer`.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` for fewer than 3 points and
    /// `TessellationError::DuplicatePoint` if two consecutive points
    /// coincide.
    pub fn new(outer: &[Point2]) -> Result<Self> {
        let mut ctx = Self {
            points: Vec::new(),
            edges: Vec::new(),
            triangles: SlotMap::with_key(),
            nodes: SlotMap::with_key(),
            front: None,
            basin: Basin::default(),
            edge_event: EdgeEvent::default(),
            order: Vec::new(),
            interior: Vec::new(),
            input_count: 0,
            hole_count: 0,
            state: SweepState::Constructed,
            restore_delaunay: true,
        };
        ctx.add_ring(outer)?;
        Ok(ctx)
    }

    /// Enables or disables the final edge-flip pass that restores the
    /// Delaunay property on interior edges. On by default.
    #[must_use]
    pub fn restore_delaunay(mut self, on: bool) -> Self {
        self.restore_delaunay = on;
        self
    }

    #[must_use]
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Number of input points (outer, holes, and Steiner points).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.input_count
    }

    /// Adds a hole ring.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidState` after triangulation has
    /// started, or the errors of [`SweepContext::new`] for a bad ring.
    pub fn add_hole(&mut self, hole: &[Point2]) -> Result<()> {
        self.expect_state(SweepState::Constructed)?;
        self.add_ring(hole)?;
        self.hole_count += 1;
        Ok(())
    }

    /// Adds a Steiner point, which must lie inside the polygon.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidState` after triangulation has
    /// started.
    pub fn add_point(&mut self, p: Point2) -> Result<()> {
        self.expect_state(SweepState::Constructed)?;
        self.points.push(SweepPoint {
            p,
            edges: Vec::new(),
        });
        self.input_count += 1;
        Ok(())
    }

    /// Runs the sweep and returns the interior triangles.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidState` if called twice,
    /// `DuplicatePoint` for coincident input points, and
    /// `CollinearConstraint` or `IntersectingConstraints` for input the
    /// sweep cannot resolve.
    pub fn triangulate(&mut self) -> Result<Vec<MeshTriangle>> {
        self.expect_state(SweepState::Constructed)?;
        debug!(
            points = self.input_count,
            holes = self.hole_count,
            "sweep triangulation start"
        );

        self.init_triangulation()?;
        self.create_advancing_front()?;
        self.state = SweepState::Initialized;

        self.sweep_points()?;
        self.state = SweepState::Swept;

        self.finalization_polygon()?;
        if self.restore_delaunay {
            let flips = self.restore_delaunay_pass();
            if flips > 0 {
                debug!(flips, "restored Delaunay edges");
            }
        }
        self.state = SweepState::Finalized;
        debug!(triangles = self.interior.len(), "sweep triangulation done");
        self.triangles()
    }

    /// Interior triangles of a finished triangulation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidState` before
    /// [`SweepContext::triangulate`] has completed.
    pub fn triangles(&self) -> Result<Vec<MeshTriangle>> {
        self.expect_state(SweepState::Finalized)?;
        Ok(self
            .interior
            .iter()
            .map(|&t| self.mesh_triangle(t))
            .collect())
    }

    /// Every triangle built by the sweep, exterior ones included.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidState` before
    /// [`SweepContext::triangulate`] has completed.
    pub fn map_triangles(&self) -> Result<Vec<MeshTriangle>> {
        self.expect_state(SweepState::Finalized)?;
        Ok(self.triangles.keys().map(|t| self.mesh_triangle(t)).collect())
    }

    fn mesh_triangle(&self, t: TriangleId) -> MeshTriangle {
        let tri = &self.triangles[t];
        MeshTriangle {
            points: tri.points.map(|i| self.points[i].p),
            indices: tri.points,
            is_interior: tri.interior,
        }
    }

    fn expect_state(&self, state: SweepState) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(TessellationError::InvalidState(format!(
                "expected {state:?}, context is {:?}",
                self.state
            ))
            .into())
        }
    }

    /// Appends a closed ring and its constrained edges.
    #[allow(clippy::float_cmp)]
    fn add_ring(&mut self, ring: &[Point2]) -> Result<()> {
        if ring.len() < 3 {
            return Err(TessellationError::Failed(format!(
                "ring needs at least 3 points, got {}",
                ring.len()
            ))
            .into());
        }
        let base = self.points.len();
        self.points.extend(ring.iter().map(|&p| SweepPoint {
            p,
            edges: Vec::new(),
        }));
        let n = ring.len();
        for i in 0..n {
            let (a, b) = (base + i, base + (i + 1) % n);
            let (pa, pb) = (self.points[a].p, self.points[b].p);
            let (p, q) = if pa.y > pb.y || (pa.y == pb.y && pa.x > pb.x) {
                (b, a)
            } else if pa == pb {
                return Err(TessellationError::DuplicatePoint { x: pa.x, y: pa.y }.into());
            } else {
                (a, b)
            };
            self.points[q].edges.push(self.edges.len());
            self.edges.push(SweepEdge { p, q });
        }
        self.input_count += n;
        Ok(())
    }

    /// Sorts the input and places the two sentinel points.
    fn init_triangulation(&mut self) -> Result<()> {
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (self.points[a].p, self.points[b].p);
            pa.y.total_cmp(&pb.y).then(pa.x.total_cmp(&pb.x))
        });
        for w in order.windows(2) {
            let (pa, pb) = (self.points[w[0]].p, self.points[w[1]].p);
            if pa == pb {
                return Err(TessellationError::DuplicatePoint { x: pa.x, y: pa.y }.into());
            }
        }

        let (mut min, mut max) = (self.points[0].p, self.points[0].p);
        for sp in &self.points {
            min = min.inf(&sp.p);
            max = max.sup(&sp.p);
        }
        let dx = ALPHA * (max.x - min.x);
        let dy = ALPHA * (max.y - min.y);
        // Tail on the left, head on the right.
        self.points.push(SweepPoint {
            p: Point2::new(min.x - dx, min.y - dy),
            edges: Vec::new(),
        });
        self.points.push(SweepPoint {
            p: Point2::new(max.x + dx, min.y - dy),
            edges: Vec::new(),
        });
        self.order = order;
        Ok(())
    }

    fn create_advancing_front(&mut self) -> Result<()> {
        let p0 = *self
            .order
            .first()
            .ok_or_else(|| TessellationError::InvalidState("no points to sweep".into()))?;
        let (tail, head) = (self.input_count, self.input_count + 1);
        let seed = self.triangles.insert(Triangle::new(p0, tail, head));

        let first = self.nodes.insert(Node::new(tail, self.points[tail].p.x, Some(seed)));
        let middle = self.nodes.insert(Node::new(p0, self.points[p0].p.x, Some(seed)));
        let last = self.nodes.insert(Node::new(head, self.points[head].p.x, None));
        self.nodes[first].next = Some(middle);
        self.nodes[middle].prev = Some(first);
        self.nodes[middle].next = Some(last);
        self.nodes[last].prev = Some(middle);
        self.front = Some(AdvancingFront::new(first));
        Ok(())
    }

    #[cfg(test)]
    fn sweep_order(&self) -> &[usize] {
        &self.order
    }

    /// Finds a triangle on the boundary and floods the interior from it.
    fn finalization_polygon(&mut self) -> Result<()> {
        let front = self
            .front
            .ok_or_else(|| TessellationError::InvalidState("advancing front missing".into()))?;
        let start = self.nodes[front.head]
            .next
            .ok_or_else(|| TessellationError::Failed("advancing front is empty".into()))?;
        let p = self.nodes[start].point;
        let mut t = self.nodes[start].triangle;
        let mut guard = self.triangles.len();
        while let Some(tt) = t {
            if self.triangles[tt].constrained_cw(p) || guard == 0 {
                break;
            }
            t = self.triangles[tt].neighbor_ccw(p);
            guard -= 1;
        }
        let seed = t.ok_or_else(|| {
            TessellationError::Failed("no boundary triangle to seed the interior".into())
        })?;
        self.mesh_clean(seed);
        Ok(())
    }

    /// Marks every triangle reachable from `seed` without crossing a
    /// constrained edge as interior.
    fn mesh_clean(&mut self, seed: TriangleId) {
        let mut stack = vec![seed];
        while let Some(t) = stack.pop() {
            let tri = &mut self.triangles[t];
            if tri.interior {
                continue;
            }
            tri.interior = true;
            self.interior.push(t);
            for i in 0..3 {
                if !tri.constrained[i] {
                    if let Some(n) = tri.neighbors[i] {
                        stack.push(n);
                    }
                }
            }
        }
    }

    /// Flips interior unconstrained edges that still fail the in-circle
    /// test. Returns the number of flips.
    fn restore_delaunay_pass(&mut self) -> usize {
        let limit = self.interior.len().saturating_mul(self.interior.len()).max(16);
        let mut flips = 0;
        loop {
            let mut changed = false;
            for k in 0..self.interior.len() {
                let t = self.interior[k];
                if let Some((p, ot, op)) = self.first_illegal_edge(t) {
                    self.rotate_triangle_pair(t, p, ot, op);
                    flips += 1;
                    changed = true;
                }
            }
            if !changed || flips >= limit {
                return flips;
            }
        }
    }

    fn first_illegal_edge(&self, t: TriangleId) -> Option<(usize, TriangleId, usize)> {
        let tri = self.triangles[t];
        (0..3).find_map(|i| {
            if tri.constrained[i] {
                return None;
            }
            let ot = tri.neighbors[i]?;
            if !self.triangles[ot].interior {
                return None;
            }
            let p = tri.points[i];
            let op = self.opposite_point(ot, t, p);
            let (a, b, c, d) = (
                self.points[p].p,
                self.points[tri.point_ccw(p)].p,
                self.points[tri.point_cw(p)].p,
                self.points[op].p,
            );
            let scale = (a - d)
                .norm_squared()
                .max((b - d).norm_squared())
                .max((c - d).norm_squared());
            let det = in_circle_det(&a, &b, &c, &d)?;
            (det > EPSILON * scale * scale).then_some((p, ot, op))
        })
    }
}
