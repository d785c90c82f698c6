use super::loops::LoopId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// A planar region bounded by an outer loop and optionally inner loops
/// (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The outer boundary loop.
    pub outer_loop: LoopId,
    /// Inner boundary loops (holes).
    pub inner_loops: Vec<LoopId>,
}

impl FaceData {
    #[must_use]
    pub fn new(outer_loop: LoopId, inner_loops: Vec<LoopId>) -> Self {
        Self {
            outer_loop,
            inner_loops,
        }
    }

    /// All boundary loops, outer first.
    pub fn loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        std::iter::once(self.outer_loop).chain(self.inner_loops.iter().copied())
    }
}
