pub mod curve;
pub mod dump;
pub mod poly_curve;
pub mod polygon;

pub use curve::{Arc2d, Curve2d, Line2d};
pub use dump::PlainData;
pub use poly_curve::PolyCurve2d;
pub use polygon::{DiscretePolygon, Polygon2d};

/// Compares two slices element-wise with `eq`.
///
/// When `ordered` is false the slices are compared as multisets: every
/// element of `a` must be matched by a distinct element of `b`.
#[must_use]
pub fn is_same_array<T>(a: &[T], b: &[T], mut eq: impl FnMut(&T, &T) -> bool, ordered: bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if ordered {
        return a.iter().zip(b).all(|(x, y)| eq(x, y));
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|x| {
        let found = b
            .iter()
            .enumerate()
            .position(|(j, y)| !used[j] && eq(x, y));
        found.is_some_and(|j| {
            used[j] = true;
            true
        })
    })
}
