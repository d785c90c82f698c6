use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{Curve2d, PolyCurve2d, Polygon2d};
use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Conversion to and from plain JSON-like data.
///
/// `dump` never fails; `load` validates the shape and the geometric
/// invariants of the value it rebuilds.
pub trait PlainData: Sized + DeserializeOwned {
    fn dump(&self) -> Value;

    /// Checks invariants that the serde shape alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated invariant.
    fn check_loaded(&self) -> Result<()>;

    /// Rebuilds a value from dumped data.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDumpData` for malformed data, or the
    /// geometric error of an invalid value.
    fn load(data: &Value) -> Result<Self> {
        let value: Self = serde_json::from_value(data.clone()).map_err(GeometryError::from)?;
        value.check_loaded()?;
        Ok(value)
    }

    /// Returns `true` if `data` loads into a valid value.
    fn is_dump_data(data: &Value) -> bool {
        Self::load(data).is_ok()
    }
}

fn point_data(p: &Point2) -> Value {
    json!([p.x, p.y])
}

impl PlainData for Curve2d {
    fn dump(&self) -> Value {
        match self {
            Self::Line(l) => json!({
                "type": "Line",
                "start": point_data(&l.start),
                "end": point_data(&l.end),
            }),
            Self::Arc(a) => json!({
                "type": "Arc",
                "center": point_data(&a.center),
                "radius": a.radius,
                "start_angle": a.start_angle,
                "end_angle": a.end_angle,
                "clockwise": a.clockwise,
            }),
        }
    }

    fn check_loaded(&self) -> Result<()> {
        self.check()
    }
}

impl PlainData for PolyCurve2d {
    fn dump(&self) -> Value {
        json!({ "curves": self.curves().iter().map(PlainData::dump).collect::<Vec<_>>() })
    }

    fn check_loaded(&self) -> Result<()> {
        self.curves().iter().try_for_each(Curve2d::check)
    }
}

impl PlainData for Polygon2d {
    fn dump(&self) -> Value {
        json!({
            "outer": self.outer.dump(),
            "holes": self.holes.iter().map(PlainData::dump).collect::<Vec<_>>(),
        })
    }

    fn check_loaded(&self) -> Result<()> {
        self.outer.check_loaded()?;
        self.holes.iter().try_for_each(PlainData::check_loaded)
    }
}
