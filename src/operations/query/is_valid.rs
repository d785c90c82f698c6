use crate::topology::{LoopId, TopologyStore};

/// Validates the structural invariants of a loop.
///
/// See [`TopologyStore::validate_loop`] for the checked invariants.
pub struct IsValid {
    lp: LoopId,
    verbose: bool,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(lp: LoopId) -> Self {
        Self { lp, verbose: false }
    }

    /// Logs the first violation found.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Executes the validation, returning `true` if the loop is valid.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> bool {
        store.validate_loop(self.lp, self.verbose)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeLoop;
    use crate::topology::{EdgeData, VertexData};

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn triangle(store: &mut TopologyStore) -> LoopId {
        MakeLoop::from_points(vec![p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)])
            .execute(store)
            .unwrap()
    }

    #[test]
    fn fresh_loop_is_valid() {
        let mut store = TopologyStore::new();
        let lp = triangle(&mut store);
        assert!(IsValid::new(lp).verbose(true).execute(&store));
    }

    #[test]
    fn broken_prev_link_is_detected() {
        let mut store = TopologyStore::new();
        let lp = triangle(&mut store);
        let root = store.loop_data(lp).unwrap().root.unwrap();
        let second = store.coedge(root).unwrap().next;
        store.coedge_mut(second).unwrap().prev = second;
        assert!(!IsValid::new(lp).execute(&store));
        assert!(store.for_each_coedge(lp, |_, _| {}).is_err());
    }

    #[test]
    fn wrong_count_is_detected() {
        let mut store = TopologyStore::new();
        let lp = triangle(&mut store);
        store.loop_data_mut(lp).unwrap().count = 2;
        assert!(!IsValid::new(lp).execute(&store));
    }

    #[test]
    fn disconnected_coedges_are_detected() {
        let mut store = TopologyStore::new();
        let lp = triangle(&mut store);
        // Splice in an edge that starts far away from the previous end.
        let a = store.add_vertex(VertexData::new(p(10.0, 10.0)));
        let b = store.add_vertex(VertexData::new(p(11.0, 10.0)));
        let edge = store.add_edge(EdgeData::line(a, b)).unwrap();
        let coedge = store.add_coedge(edge, false).unwrap();
        store.append_coedge(lp, coedge, None).unwrap();
        assert_eq!(store.for_each_coedge(lp, |_, _| {}).unwrap(), 4);
        assert!(!IsValid::new(lp).execute(&store));
    }

    #[test]
    fn stale_key_is_detected() {
        let mut store = TopologyStore::new();
        let lp = triangle(&mut store);
        let other = triangle(&mut store);
        // Point the first loop's root at a co-edge of a removed loop.
        let foreign = store.loop_data(other).unwrap().root.unwrap();
        store.remove_loop(other).unwrap();
        store.loop_data_mut(lp).unwrap().root = Some(foreign);
        assert!(!IsValid::new(lp).execute(&store));
    }
}
