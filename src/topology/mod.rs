pub mod coedge;
pub mod edge;
pub mod face;
pub mod loops;
pub mod vertex;

pub use coedge::{CoEdgeData, CoEdgeId};
pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use loops::{LoopData, LoopId};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices), so
/// the circular co-edge lists of loops need no shared ownership and a
/// stale reference is detected instead of dereferenced.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    coedges: SlotMap<CoEdgeId, CoEdgeData>,
    loops: SlotMap<LoopId, LoopData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn coedge_count(&self) -> usize {
        self.coedges.len()
    }

    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if either end vertex is not in the store.
    pub fn add_edge(&mut self, data: EdgeData) -> Result<EdgeId, TopologyError> {
        self.vertex(data.start)?;
        self.vertex(data.end)?;
        Ok(self.edges.insert(data))
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Edges that no co-edge uses.
    #[must_use]
    pub fn dangling_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, e)| e.is_dangling())
            .map(|(id, _)| id)
            .collect()
    }

    // --- CoEdge operations ---

    /// Creates an unowned co-edge over `edge`, linked to itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the store.
    pub fn add_coedge(&mut self, edge: EdgeId, reversed: bool) -> Result<CoEdgeId, TopologyError> {
        self.edge(edge)?;
        let id = self.coedges.insert_with_key(|key| CoEdgeData {
            edge,
            reversed,
            owner: None,
            next: key,
            prev: key,
        });
        self.edge_mut(edge)?.coedges.push(id);
        Ok(id)
    }

    /// Returns a reference to the co-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn coedge(&self, id: CoEdgeId) -> Result<&CoEdgeData, TopologyError> {
        self.coedges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("co-edge".into()))
    }

    /// Returns a mutable reference to the co-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn coedge_mut(&mut self, id: CoEdgeId) -> Result<&mut CoEdgeData, TopologyError> {
        self.coedges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("co-edge".into()))
    }

    // --- Loop operations ---

    /// Inserts an empty loop and returns its ID.
    pub fn add_loop(&mut self) -> LoopId {
        self.loops.insert(LoopData::default())
    }

    /// Returns a reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn loop_data(&self, id: LoopId) -> Result<&LoopData, TopologyError> {
        self.loops
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("loop".into()))
    }

    /// Returns a mutable reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn loop_data_mut(&mut self, id: LoopId) -> Result<&mut LoopData, TopologyError> {
        self.loops
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("loop".into()))
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if any boundary loop is not in the store.
    pub fn add_face(&mut self, data: FaceData) -> Result<FaceId, TopologyError> {
        for lp in data.loops() {
            self.loop_data(lp)?;
        }
        Ok(self.faces.insert(data))
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Visits the start vertex of every co-edge of every loop of a face,
    /// outer loop first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or a loop is corrupt.
    pub fn for_each_face_vertex(
        &self,
        face: FaceId,
        mut f: impl FnMut(VertexId, &VertexData),
    ) -> Result<(), TopologyError> {
        for lp in self.face(face)?.loops() {
            for v in self.loop_vertices(lp)? {
                f(v, self.vertex(v)?);
            }
        }
        Ok(())
    }
}
