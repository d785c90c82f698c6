pub mod sweep;
mod tessellate_curve;
mod tessellate_face;
mod tessellate_polygon;
pub mod validate;

pub use tessellate_curve::TessellateCurve;
pub use tessellate_face::TessellateFace;
pub use tessellate_polygon::TessellatePolygon;

use crate::error::{Result, TessellationError};
use crate::geometry::Curve2d;
use crate::math::Point2;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed deviation of arc chords from the true curve.
    pub tolerance: f64,
    /// Upper bound on the length of a single segment.
    pub max_segment_length: Option<f64>,
    /// Minimum number of segments per arc.
    pub min_segments: usize,
    /// Maximum number of segments per arc.
    pub max_segments: usize,
    /// Reject rings whose edges cross before triangulating.
    pub validate_input: bool,
    /// Run the edge-flip pass that restores Delaunay edges after the sweep.
    pub restore_delaunay: bool,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_segment_length: None,
            min_segments: 4,
            max_segments: 256,
            validate_input: false,
            restore_delaunay: true,
        }
    }
}

impl TessellationParams {
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_max_segment_length(mut self, length: f64) -> Self {
        self.max_segment_length = Some(length);
        self
    }

    #[must_use]
    pub fn with_validate_input(mut self, on: bool) -> Self {
        self.validate_input = on;
        self
    }

    #[must_use]
    pub fn with_restore_delaunay(mut self, on: bool) -> Self {
        self.restore_delaunay = on;
        self
    }

    /// Checks that the parameters describe a usable discretisation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` for a non-positive
    /// tolerance or segment length, or `min_segments > max_segments`.
    pub fn check(&self) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        if let Some(len) = self.max_segment_length {
            if len.is_nan() || len <= 0.0 {
                return Err(TessellationError::InvalidParameters(format!(
                    "max segment length must be positive, got {len}"
                ))
                .into());
            }
        }
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment bounds [{}, {}] are empty",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }

    /// Number of segments used for `curve`; arcs are clamped to
    /// `[min_segments, max_segments]`.
    #[must_use]
    pub fn segment_count(&self, curve: &Curve2d) -> usize {
        let n = curve.segment_count(self.tolerance, self.max_segment_length);
        match curve {
            Curve2d::Line(_) => n,
            Curve2d::Arc(_) => n.clamp(self.min_segments, self.max_segments),
        }
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}

/// A planar triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh2d {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices (each triple defines a counter-clockwise triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh2d {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Corner positions of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> Option<[Point2; 3]> {
        let tri = self.indices.get(i)?;
        let mut out = [Point2::origin(); 3];
        for (slot, &idx) in out.iter_mut().zip(tri) {
            *slot = *self.vertices.get(idx as usize)?;
        }
        Some(out)
    }

    /// Sum of the signed triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        (0..self.indices.len())
            .filter_map(|i| self.triangle(i))
            .map(|[a, b, c]| 0.5 * crate::math::cross_2d(&(b - a), &(c - a)))
            .sum()
    }
}
