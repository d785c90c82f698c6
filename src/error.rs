use thiserror::Error;

/// Top-level error type for the brep2d kernel.
#[derive(Debug, Error)]
pub enum BrepError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("invalid dump data: {0}")]
    InvalidDumpData(String),
}

impl From<serde_json::Error> for GeometryError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDumpData(err.to_string())
    }
}

/// Errors related to topological operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The circular co-edge chain of a loop is broken.
    #[error("loop is corrupt: {0}")]
    LoopCorrupt(String),

    #[error("loop needs at least 3 distinct points, got {0}")]
    DegenerateLoop(usize),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    /// Two coincident points were supplied where an edge needs distinct ends.
    #[error("duplicate point ({x}, {y}) in triangulation input")]
    DuplicatePoint { x: f64, y: f64 },

    #[error("collinear constraint edges are not supported near ({x}, {y})")]
    CollinearConstraint { x: f64, y: f64 },

    #[error("intersecting constraint edges near ({x}, {y})")]
    IntersectingConstraints { x: f64, y: f64 },

    #[error("invalid sweep state: {0}")]
    InvalidState(String),

    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`BrepError`].
pub type Result<T> = std::result::Result<T, BrepError>;
