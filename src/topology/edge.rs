use crate::error::Result;
use crate::geometry::{Arc2d, Curve2d, Line2d};
use crate::math::Point2;

use super::coedge::CoEdgeId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Chordal tolerance given to new edges.
pub const DEFAULT_EDGE_TOLERANCE: f64 = 0.01;

/// Shape of an edge between its two vertices.
///
/// The end points come from the vertices, so only the extra data needed to
/// rebuild the curve is stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCurve {
    /// A straight segment.
    Line,
    /// A circular arc around `center`.
    Arc { center: Point2, clockwise: bool },
}

/// Data associated with a topological edge.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    pub curve: EdgeCurve,
    /// Chordal tolerance used when the edge is discretised.
    pub tolerance: f64,
    /// Co-edges using this edge; an edge with none is dangling.
    pub coedges: Vec<CoEdgeId>,
}

impl EdgeData {
    /// Creates a straight edge.
    #[must_use]
    pub fn line(start: VertexId, end: VertexId) -> Self {
        Self {
            start,
            end,
            curve: EdgeCurve::Line,
            tolerance: DEFAULT_EDGE_TOLERANCE,
            coedges: Vec::new(),
        }
    }

    /// Creates an arc edge.
    #[must_use]
    pub fn arc(start: VertexId, end: VertexId, center: Point2, clockwise: bool) -> Self {
        Self {
            curve: EdgeCurve::Arc { center, clockwise },
            ..Self::line(start, end)
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn is_dangling(&self) -> bool {
        self.coedges.is_empty()
    }

    /// Builds the planar curve of this edge between the given end positions.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the end points are degenerate for the
    /// edge's curve type.
    pub fn to_curve(&self, start: Point2, end: Point2) -> Result<Curve2d> {
        match self.curve {
            EdgeCurve::Line => Line2d::new(start, end).map(Curve2d::Line),
            EdgeCurve::Arc { center, clockwise } => {
                Arc2d::from_center_points(center, &start, &end, clockwise).map(Curve2d::Arc)
            }
        }
    }
}
