use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Polygon2d;
use crate::topology::{FaceId, TopologyStore};

/// Builds the planar region of a face with normalised winding.
///
/// The outer loop is returned counter-clockwise and every hole clockwise,
/// whatever the stored orientation. Inner loops that fail validation are
/// skipped.
pub struct ClipPolygon {
    face: FaceId,
}

impl ClipPolygon {
    /// Creates a new `ClipPolygon` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the outer loop is invalid,
    /// or a topology error if the face is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Polygon2d> {
        let face = store.face(self.face)?;
        if !store.validate_loop(face.outer_loop, true) {
            return Err(OperationError::InvalidInput("face outer loop is invalid".into()).into());
        }
        let mut outer = store.loop_curves(face.outer_loop)?;
        if outer.signed_area() < 0.0 {
            outer = outer.reversed();
        }

        let mut holes = Vec::with_capacity(face.inner_loops.len());
        for &lp in &face.inner_loops {
            if !store.validate_loop(lp, true) {
                debug!(?lp, "skipping invalid inner loop");
                continue;
            }
            let hole = store.loop_curves(lp)?;
            holes.push(if hole.signed_area() > 0.0 {
                hole.reversed()
            } else {
                hole
            });
        }
        Ok(Polygon2d::new(outer, holes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, Point3};
    use crate::operations::creation::{MakeFace, MakeLoop};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn winding_is_normalised() {
        let mut store = TopologyStore::new();
        // Clockwise outer, counter-clockwise hole.
        let outer = MakeLoop::from_points(vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)])
            .execute(&mut store)
            .unwrap();
        let hole = MakeLoop::from_points(vec![p(2.0, 2.0), p(4.0, 2.0), p(4.0, 4.0), p(2.0, 4.0)])
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(outer, vec![hole]).execute(&mut store).unwrap();

        let poly = ClipPolygon::new(face).execute(&store).unwrap();
        assert!(poly.outer.signed_area() > 0.0);
        assert!(poly.holes[0].signed_area() < 0.0);
        assert_relative_eq!(poly.signed_area(), 96.0);
        assert!(!poly.is_point_inside(&Point2::new(3.0, 3.0), false, 1e-6));
        assert!(poly.is_point_inside(&Point2::new(6.0, 6.0), false, 1e-6));
    }

    #[test]
    fn invalid_hole_is_skipped() {
        let mut store = TopologyStore::new();
        let outer = MakeLoop::from_points(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)])
            .execute(&mut store)
            .unwrap();
        let hole = MakeLoop::from_points(vec![p(2.0, 2.0), p(4.0, 2.0), p(4.0, 4.0)])
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(outer, vec![hole]).execute(&mut store).unwrap();
        store.loop_data_mut(hole).unwrap().count = 7;

        let poly = ClipPolygon::new(face).execute(&store).unwrap();
        assert!(poly.holes.is_empty());
    }
}
