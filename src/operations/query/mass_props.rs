use crate::math::polygon_2d::area_centroid;
use crate::math::Point2;
use crate::topology::{LoopId, TopologyStore};

use super::LoopPolygon;

/// Area properties of a planar loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    /// Signed area, positive for counter-clockwise loops.
    pub area: f64,
    pub centroid: Point2,
}

/// Computes the signed area and centroid of a loop.
pub struct MassProps {
    lp: LoopId,
}

impl MassProps {
    /// Creates a new `MassProps` query.
    #[must_use]
    pub fn new(lp: LoopId) -> Self {
        Self { lp }
    }

    /// Executes the query over the discretised loop.
    ///
    /// Returns `None` if the loop fails validation or encloses no area.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> Option<MassProperties> {
        if !store.validate_loop(self.lp, false) {
            return None;
        }
        let ring = LoopPolygon::new(self.lp)
            .closed(false)
            .to_discrete_polygon(store)
            .ok()?;
        area_centroid(&ring).map(|(area, centroid)| MassProperties { area, centroid })
    }
}
