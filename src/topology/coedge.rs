use super::edge::EdgeId;
use super::loops::LoopId;

slotmap::new_key_type! {
    /// Unique identifier for a co-edge in the topology store.
    pub struct CoEdgeId;
}

/// One use of an edge by a loop.
///
/// Co-edges of a loop form a circular doubly-linked list through `next`
/// and `prev`. A freshly created co-edge links to itself.
#[derive(Debug, Clone, Copy)]
pub struct CoEdgeData {
    pub edge: EdgeId,
    /// If `true`, the edge is traversed from its end vertex to its start.
    pub reversed: bool,
    /// Loop the co-edge currently belongs to.
    pub owner: Option<LoopId>,
    pub next: CoEdgeId,
    pub prev: CoEdgeId,
}
