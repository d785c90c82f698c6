mod clip_polygon;
mod is_valid;
mod loop_polygon;
mod mass_props;

pub use clip_polygon::ClipPolygon;
pub use is_valid::IsValid;
pub use loop_polygon::LoopPolygon;
pub use mass_props::{MassProperties, MassProps};
