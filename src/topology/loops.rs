use std::collections::HashSet;

use tracing::{debug, warn};

use super::{CoEdgeData, CoEdgeId, EdgeId, TopologyStore, VertexId};
use crate::error::TopologyError;
use crate::geometry::{Curve2d, PolyCurve2d};
use crate::math::polygon_2d::dedup_ring;
use crate::math::{Point2, Point3, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a loop in the topology store.
    pub struct LoopId;
}

/// A closed boundary made of co-edges.
///
/// `root` is the entry point of the circular co-edge list and `count` its
/// length. An empty loop has no root and a zero count.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopData {
    pub root: Option<CoEdgeId>,
    pub count: usize,
}

impl LoopData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

fn corrupt(msg: impl Into<String>) -> TopologyError {
    TopologyError::LoopCorrupt(msg.into())
}

impl TopologyStore {
    /// Splices an unowned co-edge into `lp` right after `after`.
    ///
    /// Without `after` the co-edge is appended at the end of the loop
    /// (before the root). The first co-edge of an empty loop becomes its
    /// root.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` if the co-edge already has an
    /// owner or `after` is not part of `lp`.
    pub fn append_coedge(
        &mut self,
        lp: LoopId,
        coedge: CoEdgeId,
        after: Option<CoEdgeId>,
    ) -> Result<(), TopologyError> {
        if self.coedge(coedge)?.owner.is_some() {
            return Err(TopologyError::InvalidTopology(
                "co-edge already belongs to a loop".into(),
            ));
        }
        let root = self.loop_data(lp)?.root;
        let Some(root) = root else {
            let c = self.coedge_mut(coedge)?;
            c.next = coedge;
            c.prev = coedge;
            c.owner = Some(lp);
            let data = self.loop_data_mut(lp)?;
            data.root = Some(coedge);
            data.count = 1;
            return Ok(());
        };

        let after = match after {
            Some(a) => a,
            None => self.coedge(root)?.prev,
        };
        if self.coedge(after)?.owner != Some(lp) {
            return Err(TopologyError::InvalidTopology(
                "anchor co-edge is not part of the loop".into(),
            ));
        }
        let next = self.coedge(after)?.next;

        let c = self.coedge_mut(coedge)?;
        c.prev = after;
        c.next = next;
        c.owner = Some(lp);
        self.coedge_mut(after)?.next = coedge;
        self.coedge_mut(next)?.prev = coedge;
        self.loop_data_mut(lp)?.count += 1;
        Ok(())
    }

    /// Unlinks a co-edge from its loop, leaving it unowned and self-linked.
    ///
    /// # Errors
    ///
    /// Returns an error if the co-edge or its owner loop is missing.
    pub fn detach_coedge(&mut self, coedge: CoEdgeId) -> Result<(), TopologyError> {
        let c = *self.coedge(coedge)?;
        let Some(lp) = c.owner else {
            return Ok(());
        };
        let data = *self.loop_data(lp)?;
        if data.count <= 1 || c.next == coedge {
            let d = self.loop_data_mut(lp)?;
            d.root = None;
            d.count = 0;
        } else {
            self.coedge_mut(c.prev)?.next = c.next;
            self.coedge_mut(c.next)?.prev = c.prev;
            let d = self.loop_data_mut(lp)?;
            if d.root == Some(coedge) {
                d.root = Some(c.next);
            }
            d.count -= 1;
        }
        let c = self.coedge_mut(coedge)?;
        c.next = coedge;
        c.prev = coedge;
        c.owner = None;
        Ok(())
    }

    /// Links two unowned co-edges so that `b` follows `a`.
    ///
    /// Used to assemble a chain before handing it to [`Self::adopt_loop`].
    ///
    /// # Errors
    ///
    /// Returns an error if either co-edge is missing or already owned.
    pub fn link_coedges(&mut self, a: CoEdgeId, b: CoEdgeId) -> Result<(), TopologyError> {
        if self.coedge(a)?.owner.is_some() || self.coedge(b)?.owner.is_some() {
            return Err(TopologyError::InvalidTopology(
                "cannot relink co-edges owned by a loop".into(),
            ));
        }
        self.coedge_mut(a)?.next = b;
        self.coedge_mut(b)?.prev = a;
        Ok(())
    }

    /// Walks the co-edge cycle of `lp` from its root.
    ///
    /// The walk is bounded by the loop's `count` and fails with
    /// `TopologyError::LoopCorrupt` on a stale key, a co-edge owned by a
    /// different loop, an early return to the root, a `prev` link that
    /// disagrees with the walk, or not being back at the root after `count`
    /// steps.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::LoopCorrupt` as described above.
    pub fn loop_coedges(&self, lp: LoopId) -> Result<Vec<CoEdgeId>, TopologyError> {
        let data = self.loop_data(lp)?;
        let Some(root) = data.root else {
            return if data.count == 0 {
                Ok(Vec::new())
            } else {
                Err(corrupt(format!("no root but count {}", data.count)))
            };
        };

        let mut ids = Vec::with_capacity(data.count);
        let mut current = root;
        for step in 0..data.count {
            let c = self
                .coedges
                .get(current)
                .ok_or_else(|| corrupt(format!("stale co-edge key at step {step}")))?;
            if step > 0 && current == root {
                return Err(corrupt(format!(
                    "back at root after {step} of {} steps",
                    data.count
                )));
            }
            if c.owner != Some(lp) {
                return Err(corrupt(format!("co-edge at step {step} has another owner")));
            }
            let next = self
                .coedges
                .get(c.next)
                .ok_or_else(|| corrupt(format!("stale next key at step {step}")))?;
            if next.prev != current {
                return Err(corrupt(format!("prev link disagrees after step {step}")));
            }
            ids.push(current);
            current = c.next;
        }
        if current != root {
            return Err(corrupt(format!(
                "not back at root after {} steps",
                data.count
            )));
        }
        Ok(ids)
    }

    /// Calls `f` for every co-edge of `lp` in order and returns the count.
    ///
    /// The cycle is verified before the first call.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::LoopCorrupt` if the cycle is broken.
    pub fn for_each_coedge(
        &self,
        lp: LoopId,
        mut f: impl FnMut(CoEdgeId, &CoEdgeData),
    ) -> Result<usize, TopologyError> {
        let ids = self.loop_coedges(lp)?;
        for &id in &ids {
            f(id, self.coedge(id)?);
        }
        Ok(ids.len())
    }

    /// Start and end vertex of a co-edge in its direction of travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the co-edge or its edge is missing.
    pub fn coedge_vertices(&self, coedge: CoEdgeId) -> Result<(VertexId, VertexId), TopologyError> {
        let c = self.coedge(coedge)?;
        let e = self.edge(c.edge)?;
        Ok(if c.reversed {
            (e.end, e.start)
        } else {
            (e.start, e.end)
        })
    }

    /// Planar curve of a co-edge in its direction of travel.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity is missing or the edge geometry is
    /// degenerate.
    pub fn coedge_curve(&self, coedge: CoEdgeId) -> crate::Result<Curve2d> {
        let c = self.coedge(coedge)?;
        let e = self.edge(c.edge)?;
        let start = self.vertex(e.start)?.point_2d();
        let end = self.vertex(e.end)?.point_2d();
        let curve = e.to_curve(start, end)?;
        Ok(if c.reversed { curve.reversed() } else { curve })
    }

    /// Start vertices of the co-edges of `lp`, in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt.
    pub fn loop_vertices(&self, lp: LoopId) -> Result<Vec<VertexId>, TopologyError> {
        self.loop_coedges(lp)?
            .into_iter()
            .map(|id| self.coedge_vertices(id).map(|(start, _)| start))
            .collect()
    }

    /// Positions of [`Self::loop_vertices`].
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt.
    pub fn loop_points(&self, lp: LoopId) -> Result<Vec<Point3>, TopologyError> {
        self.loop_vertices(lp)?
            .into_iter()
            .map(|v| self.vertex(v).map(|d| d.point))
            .collect()
    }

    /// The loop as a chain of planar curves.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt or holds degenerate edges.
    pub fn loop_curves(&self, lp: LoopId) -> crate::Result<PolyCurve2d> {
        let curves = self
            .loop_coedges(lp)?
            .into_iter()
            .map(|id| self.coedge_curve(id))
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(PolyCurve2d::new(curves))
    }

    /// Checks the structural invariants of a loop.
    ///
    /// The co-edge cycle must be intact, each co-edge must end at the very
    /// vertex the next one starts from, and at least 3 distinct positions
    /// must remain after dropping consecutive duplicates. With `verbose` the
    /// first violation is logged.
    #[must_use]
    pub fn validate_loop(&self, lp: LoopId, verbose: bool) -> bool {
        match self.check_loop(lp) {
            Ok(()) => true,
            Err(err) => {
                if verbose {
                    warn!(?lp, %err, "invalid loop");
                }
                false
            }
        }
    }

    fn check_loop(&self, lp: LoopId) -> Result<(), TopologyError> {
        let ids = self.loop_coedges(lp)?;
        let n = ids.len();
        let mut points: Vec<Point2> = Vec::with_capacity(n);
        for (i, &id) in ids.iter().enumerate() {
            let (start, end) = self.coedge_vertices(id)?;
            let (next_start, _) = self.coedge_vertices(ids[(i + 1) % n])?;
            if end != next_start {
                return Err(TopologyError::InvalidTopology(format!(
                    "co-edge {i} does not end at the vertex the next one starts from"
                )));
            }
            points.push(self.vertex(start)?.point_2d());
        }
        let distinct = dedup_ring(&points, TOLERANCE).len();
        if distinct < 3 {
            return Err(TopologyError::DegenerateLoop(distinct));
        }
        Ok(())
    }

    /// Reverses the direction of travel of a loop in place.
    ///
    /// The root stays the same; every co-edge swaps its links and flips its
    /// orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt.
    pub fn reverse_loop(&mut self, lp: LoopId) -> Result<(), TopologyError> {
        for id in self.loop_coedges(lp)? {
            let c = self.coedge_mut(id)?;
            std::mem::swap(&mut c.next, &mut c.prev);
            c.reversed = !c.reversed;
        }
        Ok(())
    }

    /// Returns `true` if the loop encloses negative signed area.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is corrupt or holds degenerate edges.
    pub fn is_clockwise(&self, lp: LoopId) -> crate::Result<bool> {
        Ok(self.loop_curves(lp)?.signed_area() < 0.0)
    }

    /// Removes every co-edge of `lp`, leaving the loop empty.
    ///
    /// Edges and vertices stay in the store, possibly dangling.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is missing.
    pub fn clear_loop(&mut self, lp: LoopId) -> Result<(), TopologyError> {
        self.release_coedges(lp).map(|_| ())
    }

    /// Removes a loop together with its co-edges, then the edges no longer
    /// used by any co-edge and the vertices no longer used by any edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is missing.
    pub fn remove_loop(&mut self, lp: LoopId) -> Result<(), TopologyError> {
        let touched = self.release_coedges(lp)?;
        self.loops.remove(lp);

        let mut candidates: HashSet<VertexId> = HashSet::new();
        for edge in touched {
            if self.edges.get(edge).is_some_and(|e| e.is_dangling()) {
                if let Some(e) = self.edges.remove(edge) {
                    candidates.insert(e.start);
                    candidates.insert(e.end);
                }
            }
        }
        let used: HashSet<VertexId> = self
            .edges
            .values()
            .flat_map(|e| [e.start, e.end])
            .collect();
        let mut removed_vertices = 0;
        for v in candidates.difference(&used) {
            if self.vertices.remove(*v).is_some() {
                removed_vertices += 1;
            }
        }
        debug!(?lp, removed_vertices, "removed loop");
        Ok(())
    }

    /// Deletes the co-edges owned by `lp` and returns the edges they used.
    ///
    /// Ownership is taken from the co-edges themselves, so a loop with a
    /// broken cycle is still cleared completely.
    fn release_coedges(&mut self, lp: LoopId) -> Result<Vec<EdgeId>, TopologyError> {
        self.loop_data(lp)?;
        let owned: Vec<CoEdgeId> = self
            .coedges
            .iter()
            .filter(|(_, c)| c.owner == Some(lp))
            .map(|(id, _)| id)
            .collect();
        let mut touched = Vec::with_capacity(owned.len());
        for id in owned {
            if let Some(c) = self.coedges.remove(id) {
                if let Some(e) = self.edges.get_mut(c.edge) {
                    e.coedges.retain(|&x| x != id);
                }
                touched.push(c.edge);
            }
        }
        let data = self.loop_data_mut(lp)?;
        data.root = None;
        data.count = 0;
        Ok(touched)
    }

    /// Registers an externally linked co-edge chain as a new loop.
    ///
    /// Walks `next` from `root` until it returns, checking `prev` links on
    /// the way. Every co-edge of the chain must be unowned.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::LoopCorrupt` if the chain does not close
    /// consistently, or `TopologyError::InvalidTopology` if a co-edge is
    /// already owned.
    pub fn adopt_loop(&mut self, root: CoEdgeId) -> Result<LoopId, TopologyError> {
        let limit = self.coedges.len();
        let mut chain = vec![root];
        let mut current = root;
        loop {
            let c = self
                .coedges
                .get(current)
                .ok_or_else(|| corrupt("stale co-edge key in chain"))?;
            if c.owner.is_some() {
                return Err(TopologyError::InvalidTopology(
                    "co-edge already belongs to a loop".into(),
                ));
            }
            let next_id = c.next;
            let next = self
                .coedges
                .get(next_id)
                .ok_or_else(|| corrupt("stale next key in chain"))?;
            if next.prev != current {
                return Err(corrupt("prev link disagrees with next link"));
            }
            if next_id == root {
                break;
            }
            if chain.len() >= limit {
                return Err(corrupt("chain never returns to its root"));
            }
            chain.push(next_id);
            current = next_id;
        }

        let lp = self.loops.insert(LoopData {
            root: Some(root),
            count: chain.len(),
        });
        for id in &chain {
            self.coedge_mut(*id)?.owner = Some(lp);
        }
        debug!(?lp, count = chain.len(), "adopted co-edge chain");
        Ok(lp)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeLoop;
    use crate::topology::{EdgeData, VertexData};

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square(store: &mut TopologyStore) -> LoopId {
        MakeLoop::from_points(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)])
            .execute(store)
            .unwrap()
    }

    /// Unowned co-edge over a fresh straight edge.
    fn loose_coedge(store: &mut TopologyStore, a: VertexId, b: VertexId) -> CoEdgeId {
        let edge = store.add_edge(EdgeData::line(a, b)).unwrap();
        store.add_coedge(edge, false).unwrap()
    }

    fn triangle_vertices(store: &mut TopologyStore) -> [VertexId; 3] {
        [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)].map(|q| store.add_vertex(VertexData::new(q)))
    }

    #[test]
    fn coedges_must_share_vertices() {
        let mut store = TopologyStore::new();
        let corners = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
        let lp = store.add_loop();
        for i in 0..3 {
            // Each edge gets its own pair of coincident vertices.
            let a = store.add_vertex(VertexData::new(corners[i]));
            let b = store.add_vertex(VertexData::new(corners[(i + 1) % 3]));
            let c = loose_coedge(&mut store, a, b);
            store.append_coedge(lp, c, None).unwrap();
        }
        assert_eq!(store.vertex_count(), 6);
        assert_eq!(store.loop_coedges(lp).unwrap().len(), 3);
        assert!(!store.validate_loop(lp, true));

        let shared = store.add_loop();
        let [a, b, c] = triangle_vertices(&mut store);
        for (s, e) in [(a, b), (b, c), (c, a)] {
            let id = loose_coedge(&mut store, s, e);
            store.append_coedge(shared, id, None).unwrap();
        }
        assert!(store.validate_loop(shared, true));
    }

    #[test]
    fn append_after_splices_into_the_middle() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let ids = store.loop_coedges(lp).unwrap();
        let [a, b] = [p(5.0, 5.0), p(6.0, 5.0)].map(|q| store.add_vertex(VertexData::new(q)));
        let x = loose_coedge(&mut store, a, b);

        store.append_coedge(lp, x, Some(ids[1])).unwrap();
        assert_eq!(store.coedge(ids[1]).unwrap().next, x);
        assert_eq!(store.coedge(x).unwrap().prev, ids[1]);
        assert_eq!(store.coedge(x).unwrap().next, ids[2]);
        assert_eq!(store.coedge(ids[2]).unwrap().prev, x);
        assert_eq!(store.coedge(x).unwrap().owner, Some(lp));
        assert_eq!(store.loop_data(lp).unwrap().count, 5);
        assert_eq!(
            store.loop_coedges(lp).unwrap(),
            vec![ids[0], ids[1], x, ids[2], ids[3]]
        );
    }

    #[test]
    fn append_rejects_owned_coedge_and_foreign_anchor() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let other = square(&mut store);
        let owned = store.loop_data(other).unwrap().root.unwrap();
        assert!(matches!(
            store.append_coedge(lp, owned, None),
            Err(TopologyError::InvalidTopology(_))
        ));

        let [a, b] = [p(5.0, 5.0), p(6.0, 5.0)].map(|q| store.add_vertex(VertexData::new(q)));
        let x = loose_coedge(&mut store, a, b);
        assert!(matches!(
            store.append_coedge(lp, x, Some(owned)),
            Err(TopologyError::InvalidTopology(_))
        ));
        assert_eq!(store.loop_data(lp).unwrap().count, 4);
    }

    #[test]
    fn adopt_closed_chain() {
        let mut store = TopologyStore::new();
        let [a, b, c] = triangle_vertices(&mut store);
        let ab = loose_coedge(&mut store, a, b);
        let bc = loose_coedge(&mut store, b, c);
        let ca = loose_coedge(&mut store, c, a);
        store.link_coedges(ab, bc).unwrap();
        store.link_coedges(bc, ca).unwrap();
        store.link_coedges(ca, ab).unwrap();

        let lp = store.adopt_loop(ab).unwrap();
        let data = *store.loop_data(lp).unwrap();
        assert_eq!(data.root, Some(ab));
        assert_eq!(data.count, 3);
        assert_eq!(store.loop_coedges(lp).unwrap(), vec![ab, bc, ca]);
        assert!([ab, bc, ca]
            .iter()
            .all(|&id| store.coedge(id).unwrap().owner == Some(lp)));
        assert!(store.validate_loop(lp, true));
    }

    #[test]
    fn adopt_rejects_open_chain() {
        let mut store = TopologyStore::new();
        let [a, b, c] = triangle_vertices(&mut store);
        let ab = loose_coedge(&mut store, a, b);
        let bc = loose_coedge(&mut store, b, c);
        let ca = loose_coedge(&mut store, c, a);
        store.link_coedges(ab, bc).unwrap();
        store.link_coedges(bc, ca).unwrap();
        // `ca` still links to itself, so the chain never returns to `ab`.
        let loops_before = store.loop_count();
        assert!(matches!(
            store.adopt_loop(ab),
            Err(TopologyError::LoopCorrupt(_))
        ));
        assert_eq!(store.loop_count(), loops_before);
        assert!(store.coedge(ab).unwrap().owner.is_none());
    }

    #[test]
    fn adopt_rejects_owned_coedge() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let root = store.loop_data(lp).unwrap().root.unwrap();
        assert!(matches!(
            store.adopt_loop(root),
            Err(TopologyError::InvalidTopology(_))
        ));
    }

    #[test]
    fn link_rejects_owned_coedges() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let ids = store.loop_coedges(lp).unwrap();
        assert!(store.link_coedges(ids[0], ids[2]).is_err());
        assert_eq!(store.coedge(ids[0]).unwrap().next, ids[1]);
    }

    #[test]
    fn detach_root_moves_root_forward() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let ids = store.loop_coedges(lp).unwrap();

        store.detach_coedge(ids[0]).unwrap();
        let data = *store.loop_data(lp).unwrap();
        assert_eq!(data.root, Some(ids[1]));
        assert_eq!(data.count, 3);
        assert_eq!(store.coedge(ids[3]).unwrap().next, ids[1]);
        assert_eq!(store.coedge(ids[1]).unwrap().prev, ids[3]);

        let loose = *store.coedge(ids[0]).unwrap();
        assert!(loose.owner.is_none());
        assert_eq!((loose.next, loose.prev), (ids[0], ids[0]));
        assert_eq!(store.loop_coedges(lp).unwrap(), vec![ids[1], ids[2], ids[3]]);

        // Detaching an unowned co-edge changes nothing.
        store.detach_coedge(ids[0]).unwrap();
        assert_eq!(store.loop_data(lp).unwrap().count, 3);

        // A detached co-edge can be spliced back in.
        store.append_coedge(lp, ids[0], Some(ids[3])).unwrap();
        assert_eq!(store.loop_data(lp).unwrap().count, 4);
        assert!(store.validate_loop(lp, true));
    }

    #[test]
    fn clear_loop_leaves_dangling_edges() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        assert!(store.dangling_edges().is_empty());

        store.clear_loop(lp).unwrap();
        assert!(store.loop_data(lp).unwrap().is_empty());
        assert_eq!(store.loop_data(lp).unwrap().count, 0);
        assert_eq!(store.coedge_count(), 0);
        assert_eq!(store.edge_count(), 4);
        assert_eq!(store.vertex_count(), 4);
        assert_eq!(store.dangling_edges().len(), 4);
        assert!(store.loop_coedges(lp).unwrap().is_empty());
    }

    #[test]
    fn remove_loop_releases_unused_edges_and_vertices() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let keep = store.loop_vertices(lp).unwrap()[0];
        let far = store.add_vertex(VertexData::new(p(9.0, 9.0)));
        let spur = store.add_edge(EdgeData::line(keep, far)).unwrap();
        assert_eq!(store.dangling_edges(), vec![spur]);

        store.remove_loop(lp).unwrap();
        assert!(store.loop_data(lp).is_err());
        assert_eq!(store.loop_count(), 0);
        assert_eq!(store.coedge_count(), 0);
        // Only the spur and its two vertices survive.
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.vertex_count(), 2);
        assert!(store.vertex(keep).is_ok());
        assert!(store.vertex(far).is_ok());
        assert!(store.edge(spur).is_ok());
    }

    #[test]
    fn reverse_keeps_loop_valid() {
        let mut store = TopologyStore::new();
        let lp = square(&mut store);
        let before = store.loop_vertices(lp).unwrap();
        assert!(!store.is_clockwise(lp).unwrap());

        store.reverse_loop(lp).unwrap();
        assert!(store.validate_loop(lp, true));
        assert!(store.is_clockwise(lp).unwrap());
        let after = store.loop_vertices(lp).unwrap();
        // Same root; travel now starts from the root edge's far vertex.
        assert_eq!(after[0], before[1]);
        assert_eq!(after[1], before[0]);
        assert_eq!(after[2], before[3]);
        assert_eq!(after[3], before[2]);
        assert!((store.loop_curves(lp).unwrap().signed_area() + 4.0).abs() < 1e-12);
    }
}
