use std::f64::consts::FRAC_PI_4;

use tracing::{debug, trace};

use super::advancing_front::{Node, NodeId};
use super::context::{Basin, EdgeEvent, SweepContext, SweepEdge};
use super::predicates::{
    angle_exceeds_90_degrees, angle_exceeds_plus_90_degrees_or_is_negative, angle, in_circle,
    in_scan_area, orient_2d, Orientation,
};
use super::triangle::{Triangle, TriangleId};
use super::EPSILON;
use crate::error::{BrepError, Result, TessellationError};
use crate::math::Point2;

const THREE_PI_4: f64 = 3.0 * FRAC_PI_4;

fn broken_front(what: &str) -> BrepError {
    TessellationError::Failed(format!("advancing front is missing {what}")).into()
}

impl SweepContext {
    // ---- accessors ----

    fn pt(&self, i: usize) -> Point2 {
        self.points[i].p
    }

    fn node_pt(&self, n: NodeId) -> Point2 {
        self.points[self.nodes[n].point].p
    }

    fn next_of(&self, n: NodeId) -> Result<NodeId> {
        self.nodes[n].next.ok_or_else(|| broken_front("a next node"))
    }

    fn prev_of(&self, n: NodeId) -> Result<NodeId> {
        self.nodes[n].prev.ok_or_else(|| broken_front("a previous node"))
    }

    fn node_triangle(&self, n: NodeId) -> Result<TriangleId> {
        self.nodes[n].triangle.ok_or_else(|| broken_front("a node triangle"))
    }

    fn orient_nodes(&self, a: NodeId, b: NodeId, c: NodeId) -> Orientation {
        orient_2d(&self.node_pt(a), &self.node_pt(b), &self.node_pt(c))
    }

    /// Point of `ot` across the edge it shares with `t` opposite `p`.
    pub(super) fn opposite_point(&self, ot: TriangleId, t: TriangleId, p: usize) -> usize {
        let cw = self.triangles[t].point_cw(p);
        self.triangles[ot].point_cw(cw)
    }

    fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> TriangleId {
        self.triangles.insert(Triangle::new(a, b, c))
    }

    /// Links two triangles across their shared edge, if any.
    fn mark_neighbor(&mut self, a: TriangleId, b: TriangleId) {
        let [p0, p1, p2] = self.triangles[a].points;
        let other = self.triangles[b];
        let (slot, p, q) = if other.contains_edge(p1, p2) {
            (0, p1, p2)
        } else if other.contains_edge(p0, p2) {
            (1, p0, p2)
        } else if other.contains_edge(p0, p1) {
            (2, p0, p1)
        } else {
            return;
        };
        self.triangles[a].neighbors[slot] = Some(b);
        self.triangles[b].set_neighbor_across(p, q, a);
    }

    /// Points front nodes at `t` along its edges that face the front.
    fn map_triangle_to_nodes(&mut self, t: TriangleId) {
        let Some(mut front) = self.front else {
            return;
        };
        let tri = self.triangles[t];
        for i in 0..3 {
            if tri.neighbors[i].is_none() {
                let p = tri.point_cw(tri.points[i]);
                if let Some(n) = front.locate_point(&self.nodes, p, self.pt(p).x) {
                    self.nodes[n].triangle = Some(t);
                }
            }
        }
        self.front = Some(front);
    }

    // ---- sweep ----

    pub(super) fn sweep_points(&mut self) -> Result<()> {
        for k in 1..self.order.len() {
            let point = self.order[k];
            let node = self.point_event(point)?;
            let edges = self.points[point].edges.clone();
            for e in edges {
                let edge = self.edges[e];
                self.edge_event(edge, node)?;
            }
        }
        Ok(())
    }

    fn point_event(&mut self, point: usize) -> Result<NodeId> {
        let mut front = self
            .front
            .ok_or_else(|| TessellationError::InvalidState("advancing front missing".into()))?;
        let px = self.pt(point).x;
        let node = front
            .locate_node(&self.nodes, px)
            .ok_or_else(|| broken_front("a node below the point"))?;
        self.front = Some(front);

        let new_node = self.new_front_triangle(point, node)?;

        // The point never lies left of the located node, so only the
        // right-hand tolerance matters.
        if px <= self.node_pt(node).x + EPSILON {
            self.fill(node)?;
        }
        self.fill_advancing_front(new_node)?;
        Ok(new_node)
    }

    fn new_front_triangle(&mut self, point: usize, node: NodeId) -> Result<NodeId> {
        let next = self.next_of(node)?;
        let (a, b) = (self.nodes[node].point, self.nodes[next].point);
        let t = self.add_triangle(point, a, b);
        let below = self.node_triangle(node)?;
        self.mark_neighbor(t, below);

        let x = self.pt(point).x;
        let new_node = self.nodes.insert(Node::new(point, x, None));
        self.nodes[new_node].next = Some(next);
        self.nodes[new_node].prev = Some(node);
        self.nodes[next].prev = Some(new_node);
        self.nodes[node].next = Some(new_node);

        if !self.legalize(t) {
            self.map_triangle_to_nodes(t);
        }
        Ok(new_node)
    }

    /// Closes the triangle `prev, node, next` and drops `node` from the front.
    fn fill(&mut self, node: NodeId) -> Result<()> {
        let prev = self.prev_of(node)?;
        let next = self.next_of(node)?;
        let (a, b, c) = (
            self.nodes[prev].point,
            self.nodes[node].point,
            self.nodes[next].point,
        );
        let t = self.add_triangle(a, b, c);
        let left = self.node_triangle(prev)?;
        let right = self.node_triangle(node)?;
        self.mark_neighbor(t, left);
        self.mark_neighbor(t, right);

        self.nodes[prev].next = Some(next);
        self.nodes[next].prev = Some(prev);

        if !self.legalize(t) {
            self.map_triangle_to_nodes(t);
        }
        Ok(())
    }

    fn fill_advancing_front(&mut self, n: NodeId) -> Result<()> {
        // Right holes.
        let mut node = self.nodes[n].next;
        while let Some(cur) = node {
            if self.nodes[cur].next.is_none() || self.large_hole_dont_fill(cur)? {
                break;
            }
            self.fill(cur)?;
            node = self.nodes[cur].next;
        }

        // Left holes.
        node = self.nodes[n].prev;
        while let Some(cur) = node {
            if self.nodes[cur].prev.is_none() || self.large_hole_dont_fill(cur)? {
                break;
            }
            self.fill(cur)?;
            node = self.nodes[cur].prev;
        }

        // Right basin.
        if let Some(next) = self.nodes[n].next {
            if let Some(next2) = self.nodes[next].next {
                let (a, b) = (self.node_pt(n), self.node_pt(next2));
                if (a.y - b.y).atan2(a.x - b.x) < THREE_PI_4 {
                    self.fill_basin(n)?;
                }
            }
        }
        Ok(())
    }

    fn large_hole_dont_fill(&self, node: NodeId) -> Result<bool> {
        let next = self.next_of(node)?;
        let prev = self.prev_of(node)?;
        let (o, a, b) = (self.node_pt(node), self.node_pt(next), self.node_pt(prev));

        if !angle_exceeds_90_degrees(&o, &a, &b) {
            return Ok(false);
        }
        if angle(&o, &a, &b) < 0.0 {
            return Ok(true);
        }
        // Only angles on the side of the new point count.
        if let Some(next2) = self.nodes[next].next {
            if !angle_exceeds_plus_90_degrees_or_is_negative(&o, &self.node_pt(next2), &b) {
                return Ok(false);
            }
        }
        if let Some(prev2) = self.nodes[prev].prev {
            if !angle_exceeds_plus_90_degrees_or_is_negative(&o, &a, &self.node_pt(prev2)) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn fill_basin(&mut self, node: NodeId) -> Result<()> {
        let next = self.next_of(node)?;
        let next2 = self.next_of(next)?;
        let left = if self.orient_nodes(node, next, next2) == Orientation::Ccw {
            next2
        } else {
            next
        };

        let mut bottom = left;
        while let Some(n) = self.nodes[bottom].next {
            if self.node_pt(bottom).y >= self.node_pt(n).y {
                bottom = n;
            } else {
                break;
            }
        }
        if bottom == left {
            return Ok(());
        }

        let mut right = bottom;
        while let Some(n) = self.nodes[right].next {
            if self.node_pt(right).y < self.node_pt(n).y {
                right = n;
            } else {
                break;
            }
        }
        if right == bottom {
            return Ok(());
        }

        let (lp, rp) = (self.node_pt(left), self.node_pt(right));
        self.basin = Basin {
            left: Some(left),
            right: Some(right),
            width: rp.x - lp.x,
            left_highest: lp.y > rp.y,
        };
        debug!(width = self.basin.width, "filling basin");
        self.fill_basin_req(bottom)
    }

    fn fill_basin_req(&mut self, mut node: NodeId) -> Result<()> {
        loop {
            if self.is_shallow(node) {
                return Ok(());
            }
            self.fill(node)?;

            let prev = self.prev_of(node)?;
            let next = self.next_of(node)?;
            let at_left = Some(prev) == self.basin.left;
            let at_right = Some(next) == self.basin.right;
            if at_left && at_right {
                return Ok(());
            } else if at_left {
                let next2 = self.next_of(next)?;
                if self.orient_nodes(node, next, next2) == Orientation::Cw {
                    return Ok(());
                }
                node = next;
            } else if at_right {
                let prev2 = self.prev_of(prev)?;
                if self.orient_nodes(node, prev, prev2) == Orientation::Ccw {
                    return Ok(());
                }
                node = prev;
            } else if self.node_pt(prev).y < self.node_pt(next).y {
                node = prev;
            } else {
                node = next;
            }
        }
    }

    fn is_shallow(&self, node: NodeId) -> bool {
        let side = if self.basin.left_highest {
            self.basin.left
        } else {
            self.basin.right
        };
        let Some(side) = side else {
            return true;
        };
        let height = self.node_pt(side).y - self.node_pt(node).y;
        self.basin.width > height
    }

    // ---- legalisation ----

    /// Flips edges of `t` that fail the in-circle test, recursively.
    /// Returns `true` if a flip happened.
    fn legalize(&mut self, t: TriangleId) -> bool {
        for i in 0..3 {
            let tri = self.triangles[t];
            if tri.delaunay[i] {
                continue;
            }
            let Some(ot) = tri.neighbors[i] else {
                continue;
            };
            let p = tri.points[i];
            let op = self.opposite_point(ot, t, p);
            let Some(oi) = self.triangles[ot].index(op) else {
                continue;
            };

            let other = self.triangles[ot];
            if other.constrained[oi] || other.delaunay[oi] {
                self.triangles[t].constrained[i] = other.constrained[oi];
                continue;
            }

            let inside = in_circle(
                &self.pt(p),
                &self.pt(tri.point_ccw(p)),
                &self.pt(tri.point_cw(p)),
                &self.pt(op),
            );
            if inside {
                self.triangles[t].delaunay[i] = true;
                self.triangles[ot].delaunay[oi] = true;

                self.rotate_triangle_pair(t, p, ot, op);

                if !self.legalize(t) {
                    self.map_triangle_to_nodes(t);
                }
                if !self.legalize(ot) {
                    self.map_triangle_to_nodes(ot);
                }

                self.triangles[t].delaunay[i] = false;
                self.triangles[ot].delaunay[oi] = false;
                return true;
            }
        }
        false
    }

    /// Flips the diagonal shared by `t` and `ot`, where `p` and `op` are
    /// the points opposite it.
    pub(super) fn rotate_triangle_pair(
        &mut self,
        t: TriangleId,
        p: usize,
        ot: TriangleId,
        op: usize,
    ) {
        let (tt, oo) = (self.triangles[t], self.triangles[ot]);
        let n1 = tt.neighbor_ccw(p);
        let n2 = tt.neighbor_cw(p);
        let n3 = oo.neighbor_ccw(op);
        let n4 = oo.neighbor_cw(op);

        let ce1 = tt.constrained_ccw(p);
        let ce2 = tt.constrained_cw(p);
        let ce3 = oo.constrained_ccw(op);
        let ce4 = oo.constrained_cw(op);

        let de1 = tt.delaunay_ccw(p);
        let de2 = tt.delaunay_cw(p);
        let de3 = oo.delaunay_ccw(op);
        let de4 = oo.delaunay_cw(op);

        {
            let a = &mut self.triangles[t];
            a.rotate(p, op);
            a.set_delaunay_cw(p, de2);
            a.set_delaunay_ccw(op, de3);
            a.set_constrained_cw(p, ce2);
            a.set_constrained_ccw(op, ce3);
            a.clear_neighbors();
        }
        {
            let b = &mut self.triangles[ot];
            b.rotate(op, p);
            b.set_delaunay_ccw(p, de1);
            b.set_delaunay_cw(op, de4);
            b.set_constrained_ccw(p, ce1);
            b.set_constrained_cw(op, ce4);
            b.clear_neighbors();
        }

        if let Some(n) = n1 {
            self.mark_neighbor(ot, n);
        }
        if let Some(n) = n2 {
            self.mark_neighbor(t, n);
        }
        if let Some(n) = n3 {
            self.mark_neighbor(t, n);
        }
        if let Some(n) = n4 {
            self.mark_neighbor(ot, n);
        }
        self.mark_neighbor(t, ot);
    }

    // ---- constrained edges ----

    fn edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        self.edge_event = EdgeEvent {
            edge: Some(edge),
            right: self.pt(edge.p).x > self.pt(edge.q).x,
        };
        trace!(p = edge.p, q = edge.q, "edge event");

        let t = self.node_triangle(node)?;
        if self.is_edge_side_of_triangle(t, edge.p, edge.q) {
            return Ok(());
        }

        if self.edge_event.right {
            self.fill_right_above_edge_event(edge, node)?;
        } else {
            self.fill_left_above_edge_event(edge, node)?;
        }

        let t = self.node_triangle(node)?;
        self.edge_event_points(edge.p, edge.q, t, edge.q)
    }

    /// Marks `ep`–`eq` constrained if it already is a side of `t`.
    fn is_edge_side_of_triangle(&mut self, t: TriangleId, ep: usize, eq: usize) -> bool {
        let Some(i) = self.triangles[t].edge_index(ep, eq) else {
            return false;
        };
        self.triangles[t].constrained[i] = true;
        if let Some(n) = self.triangles[t].neighbors[i] {
            self.triangles[n].mark_constrained_edge(ep, eq);
        }
        true
    }

    fn collinear_error(&self, p: usize) -> BrepError {
        let at = self.pt(p);
        TessellationError::CollinearConstraint { x: at.x, y: at.y }.into()
    }

    fn intersecting_error(&self, p: usize) -> BrepError {
        let at = self.pt(p);
        TessellationError::IntersectingConstraints { x: at.x, y: at.y }.into()
    }

    fn edge_event_points(
        &mut self,
        ep: usize,
        mut eq: usize,
        mut t: TriangleId,
        mut point: usize,
    ) -> Result<()> {
        loop {
            if self.is_edge_side_of_triangle(t, ep, eq) {
                return Ok(());
            }

            let tri = self.triangles[t];
            let p1 = tri.point_ccw(point);
            let o1 = orient_2d(&self.pt(eq), &self.pt(p1), &self.pt(ep));
            let p2 = tri.point_cw(point);
            let o2 = orient_2d(&self.pt(eq), &self.pt(p2), &self.pt(ep));

            // The constrained edge runs through a vertex: constrain the part
            // up to it and continue from there.
            let through = if o1 == Orientation::Collinear {
                Some(p1)
            } else if o2 == Orientation::Collinear {
                Some(p2)
            } else {
                None
            };
            if let Some(pc) = through {
                if !tri.contains_edge(eq, pc) {
                    return Err(self.collinear_error(pc));
                }
                self.triangles[t].mark_constrained_edge(eq, pc);
                if let Some(edge) = self.edge_event.edge.as_mut() {
                    edge.q = pc;
                }
                t = tri
                    .neighbor_across(point)
                    .ok_or_else(|| self.intersecting_error(point))?;
                eq = pc;
                point = pc;
                continue;
            }

            if o1 == o2 {
                // Rotate around `point` towards a triangle that crosses the
                // edge.
                let next = if o1 == Orientation::Cw {
                    tri.neighbor_ccw(point)
                } else {
                    tri.neighbor_cw(point)
                };
                t = next.ok_or_else(|| self.intersecting_error(point))?;
                continue;
            }

            return self.flip_edge_event(ep, eq, t, point);
        }
    }

    fn fill_right_above_edge_event(&mut self, edge: SweepEdge, mut node: NodeId) -> Result<()> {
        let ex = self.pt(edge.p).x;
        loop {
            let next = self.next_of(node)?;
            if self.node_pt(next).x >= ex {
                return Ok(());
            }
            if orient_2d(&self.pt(edge.q), &self.node_pt(next), &self.pt(edge.p))
                == Orientation::Ccw
            {
                self.fill_right_below_edge_event(edge, node)?;
            } else {
                node = next;
            }
        }
    }

    fn fill_right_below_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        if self.node_pt(node).x < self.pt(edge.p).x {
            let next = self.next_of(node)?;
            let next2 = self.next_of(next)?;
            if self.orient_nodes(node, next, next2) == Orientation::Ccw {
                self.fill_right_concave_edge_event(edge, node)?;
            } else {
                self.fill_right_convex_edge_event(edge, node)?;
                self.fill_right_below_edge_event(edge, node)?;
            }
        }
        Ok(())
    }

    fn fill_right_concave_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        let next = self.next_of(node)?;
        self.fill(next)?;
        let next = self.next_of(node)?;
        if self.nodes[next].point != edge.p
            && orient_2d(&self.pt(edge.q), &self.node_pt(next), &self.pt(edge.p))
                == Orientation::Ccw
        {
            let next2 = self.next_of(next)?;
            if self.orient_nodes(node, next, next2) == Orientation::Ccw {
                self.fill_right_concave_edge_event(edge, node)?;
            }
        }
        Ok(())
    }

    fn fill_right_convex_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        let next = self.next_of(node)?;
        let next2 = self.next_of(next)?;
        let next3 = self.next_of(next2)?;
        if self.orient_nodes(next, next2, next3) == Orientation::Ccw {
            self.fill_right_concave_edge_event(edge, next)
        } else if orient_2d(&self.pt(edge.q), &self.node_pt(next2), &self.pt(edge.p))
            == Orientation::Ccw
        {
            self.fill_right_convex_edge_event(edge, next)
        } else {
            Ok(())
        }
    }

    fn fill_left_above_edge_event(&mut self, edge: SweepEdge, mut node: NodeId) -> Result<()> {
        let ex = self.pt(edge.p).x;
        loop {
            let prev = self.prev_of(node)?;
            if self.node_pt(prev).x <= ex {
                return Ok(());
            }
            if orient_2d(&self.pt(edge.q), &self.node_pt(prev), &self.pt(edge.p))
                == Orientation::Cw
            {
                self.fill_left_below_edge_event(edge, node)?;
            } else {
                node = prev;
            }
        }
    }

    fn fill_left_below_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        if self.node_pt(node).x > self.pt(edge.p).x {
            let prev = self.prev_of(node)?;
            let prev2 = self.prev_of(prev)?;
            if self.orient_nodes(node, prev, prev2) == Orientation::Cw {
                self.fill_left_concave_edge_event(edge, node)?;
            } else {
                self.fill_left_convex_edge_event(edge, node)?;
                self.fill_left_below_edge_event(edge, node)?;
            }
        }
        Ok(())
    }

    fn fill_left_convex_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        let prev = self.prev_of(node)?;
        let prev2 = self.prev_of(prev)?;
        let prev3 = self.prev_of(prev2)?;
        if self.orient_nodes(prev, prev2, prev3) == Orientation::Cw {
            self.fill_left_concave_edge_event(edge, prev)
        } else if orient_2d(&self.pt(edge.q), &self.node_pt(prev2), &self.pt(edge.p))
            == Orientation::Cw
        {
            self.fill_left_convex_edge_event(edge, prev)
        } else {
            Ok(())
        }
    }

    fn fill_left_concave_edge_event(&mut self, edge: SweepEdge, node: NodeId) -> Result<()> {
        let prev = self.prev_of(node)?;
        self.fill(prev)?;
        let prev = self.prev_of(node)?;
        if self.nodes[prev].point != edge.p
            && orient_2d(&self.pt(edge.q), &self.node_pt(prev), &self.pt(edge.p))
                == Orientation::Cw
        {
            let prev2 = self.prev_of(prev)?;
            if self.orient_nodes(node, prev, prev2) == Orientation::Cw {
                self.fill_left_concave_edge_event(edge, node)?;
            }
        }
        Ok(())
    }

    // ---- flips ----

    fn flip_edge_event(&mut self, ep: usize, eq: usize, t: TriangleId, p: usize) -> Result<()> {
        let mut t = t;
        loop {
            let ot = self.triangles[t]
                .neighbor_across(p)
                .ok_or_else(|| self.intersecting_error(p))?;
            let op = self.opposite_point(ot, t, p);
            let tri = self.triangles[t];

            if !in_scan_area(
                &self.pt(p),
                &self.pt(tri.point_ccw(p)),
                &self.pt(tri.point_cw(p)),
                &self.pt(op),
            ) {
                let new_p = self.next_flip_point(ep, eq, ot, op)?;
                self.flip_scan_edge_event(ep, eq, t, ot, new_p)?;
                return self.edge_event_points(ep, eq, t, p);
            }

            self.rotate_triangle_pair(t, p, ot, op);
            self.map_triangle_to_nodes(t);
            self.map_triangle_to_nodes(ot);

            if p == eq && op == ep {
                let original = self.edge_event.edge;
                if original.is_some_and(|e| e.q == eq && e.p == ep) {
                    self.triangles[t].mark_constrained_edge(ep, eq);
                    self.triangles[ot].mark_constrained_edge(ep, eq);
                    self.legalize(t);
                    self.legalize(ot);
                }
                return Ok(());
            }

            let o = orient_2d(&self.pt(eq), &self.pt(op), &self.pt(ep));
            t = self.next_flip_triangle(o, t, ot, p, op);
        }
    }

    /// After a flip, legalises the triangle that no longer crosses the edge
    /// and returns the one that still does.
    fn next_flip_triangle(
        &mut self,
        o: Orientation,
        t: TriangleId,
        ot: TriangleId,
        p: usize,
        op: usize,
    ) -> TriangleId {
        let (done, keep) = if o == Orientation::Ccw { (ot, t) } else { (t, ot) };
        if let Some(i) = self.triangles[done].edge_index(p, op) {
            self.triangles[done].delaunay[i] = true;
            self.legalize(done);
            self.triangles[done].clear_delaunay();
        }
        keep
    }

    fn next_flip_point(&self, ep: usize, eq: usize, ot: TriangleId, op: usize) -> Result<usize> {
        match orient_2d(&self.pt(eq), &self.pt(op), &self.pt(ep)) {
            Orientation::Cw => Ok(self.triangles[ot].point_ccw(op)),
            Orientation::Ccw => Ok(self.triangles[ot].point_cw(op)),
            Orientation::Collinear => Err(self.collinear_error(op)),
        }
    }

    /// Walks across triangles crossed by `ep`–`eq` until one can be flipped
    /// towards `flip`.
    fn flip_scan_edge_event(
        &mut self,
        ep: usize,
        eq: usize,
        flip: TriangleId,
        t: TriangleId,
        p: usize,
    ) -> Result<()> {
        let (mut t, mut p) = (t, p);
        let flip_tri = self.triangles[flip];
        loop {
            let ot = self.triangles[t]
                .neighbor_across(p)
                .ok_or_else(|| self.intersecting_error(p))?;
            let op = self.opposite_point(ot, t, p);

            if in_scan_area(
                &self.pt(eq),
                &self.pt(flip_tri.point_ccw(eq)),
                &self.pt(flip_tri.point_cw(eq)),
                &self.pt(op),
            ) {
                return self.flip_edge_event(eq, op, ot, op);
            }
            let new_p = self.next_flip_point(ep, eq, ot, op)?;
            t = ot;
            p = new_p;
        }
    }
}
