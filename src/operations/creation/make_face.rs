use crate::error::{OperationError, Result};
use crate::topology::{FaceData, FaceId, LoopId, TopologyStore};

/// Creates a planar face from an outer loop and hole loops.
pub struct MakeFace {
    outer_loop: LoopId,
    inner_loops: Vec<LoopId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_loop: LoopId, inner_loops: Vec<LoopId>) -> Self {
        Self {
            outer_loop,
            inner_loops,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// Winding is not normalised here; see
    /// [`ClipPolygon`](crate::operations::query::ClipPolygon).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the outer loop is invalid or
    /// a loop is used twice.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        if !store.validate_loop(self.outer_loop, true) {
            return Err(OperationError::InvalidInput("outer loop is invalid".into()).into());
        }
        let mut seen = vec![self.outer_loop];
        for lp in &self.inner_loops {
            if seen.contains(lp) {
                return Err(
                    OperationError::InvalidInput("loop used twice in one face".into()).into(),
                );
            }
            seen.push(*lp);
        }
        let face = store.add_face(FaceData::new(self.outer_loop, self.inner_loops.clone()))?;
        Ok(face)
    }
}
