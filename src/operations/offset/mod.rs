mod path_split;

pub use path_split::{check_for_convex, miter_offset, OffsetPathSplit, SplitSegment};
