//! Diagnostics for triangulation input and output.

use std::collections::HashMap;

use crate::math::{Point2, Segment2};

use super::sweep::in_circle;
use super::TriangleMesh2d;

/// Returns `true` if every directed edge is used at most once, every
/// undirected edge by at most two triangles, and no triangle repeats a
/// vertex or indexes past the vertex list.
#[must_use]
pub fn check_manifold(mesh: &TriangleMesh2d) -> bool {
    let n = mesh.vertices.len();
    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in &mesh.indices {
        if tri.iter().any(|&i| i as usize >= n) {
            return false;
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
            return false;
        }
        for k in 0..3 {
            let edge = (tri[k], tri[(k + 1) % 3]);
            let count = directed.entry(edge).or_insert(0);
            *count += 1;
            if *count > 1 {
                return false;
            }
        }
    }
    // With unique directed edges an undirected edge has at most two uses.
    true
}

/// Interior edges whose flip would improve the mesh.
///
/// For every edge shared by two triangles, the vertex opposite it in one
/// triangle must not lie inside the circumcircle of the other. A violation
/// is reported when the in-circle determinant exceeds `tolerance` relative
/// to the squared edge scale.
#[must_use]
pub fn delaunay_violations(mesh: &TriangleMesh2d, tolerance: f64) -> Vec<[u32; 2]> {
    // Directed edge -> (triangle, corner opposite the edge).
    let mut owners: HashMap<(u32, u32), (usize, u32)> = HashMap::new();
    for (t, tri) in mesh.indices.iter().enumerate() {
        for k in 0..3 {
            owners.insert((tri[k], tri[(k + 1) % 3]), (t, tri[(k + 2) % 3]));
        }
    }

    let pt = |i: u32| mesh.vertices.get(i as usize).copied();
    let mut violations = Vec::new();
    for (&(a, b), &(_, c)) in &owners {
        if a > b {
            continue;
        }
        let Some(&(_, d)) = owners.get(&(b, a)) else {
            continue;
        };
        let (Some(pa), Some(pb), Some(pc), Some(pd)) = (pt(a), pt(b), pt(c), pt(d)) else {
            continue;
        };
        if in_circle_exceeds(&pc, &pa, &pb, &pd, tolerance) {
            violations.push([a, b]);
        }
    }
    violations.sort_unstable();
    violations
}

/// In-circle test of `pd` against the counter-clockwise triangle
/// `pa, pb, pc` with a relative tolerance.
fn in_circle_exceeds(pa: &Point2, pb: &Point2, pc: &Point2, pd: &Point2, tolerance: f64) -> bool {
    if !in_circle(pa, pb, pc, pd) {
        return false;
    }
    let (a, b, c) = (pa - pd, pb - pd, pc - pd);
    let det = a.norm_squared() * (b.x * c.y - c.x * b.y)
        + b.norm_squared() * (c.x * a.y - a.x * c.y)
        + c.norm_squared() * (a.x * b.y - b.x * a.y);
    let scale = a
        .norm_squared()
        .max(b.norm_squared())
        .max(c.norm_squared());
    det > tolerance * scale * scale
}

/// First point where two edges of the given closed rings cross or touch,
/// ignoring the shared corner of consecutive edges.
#[must_use]
pub fn find_ring_crossing(rings: &[&[Point2]]) -> Option<Point2> {
    let mut edges: Vec<(usize, usize, Segment2)> = Vec::new();
    for (r, ring) in rings.iter().enumerate() {
        let n = ring.len();
        for i in 0..n {
            edges.push((r, i, Segment2::new(ring[i], ring[(i + 1) % n])));
        }
    }

    for (k, (ra, ia, sa)) in edges.iter().enumerate() {
        for (rb, ib, sb) in &edges[k + 1..] {
            if ra == rb {
                let n = rings[*ra].len();
                if (ia + 1) % n == *ib || (ib + 1) % n == *ia {
                    continue;
                }
            }
            if sa.crosses(sb) {
                return Some(sa.intersection(sb).unwrap_or(sa.start));
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn quad_mesh(indices: Vec<[u32; 3]>) -> TriangleMesh2d {
        TriangleMesh2d {
            // A kite whose short diagonal 1-3 is the Delaunay one.
            vertices: vec![p(0.0, 0.0), p(2.0, -0.5), p(4.0, 0.0), p(2.0, 0.5)],
            indices,
        }
    }

    #[test]
    fn manifold_checks() {
        let good = quad_mesh(vec![[0, 1, 3], [1, 2, 3]]);
        assert!(check_manifold(&good));
        let repeated = quad_mesh(vec![[0, 1, 3], [0, 1, 3]]);
        assert!(!check_manifold(&repeated));
        let out_of_range = quad_mesh(vec![[0, 1, 7]]);
        assert!(!check_manifold(&out_of_range));
        let degenerate = quad_mesh(vec![[0, 1, 1]]);
        assert!(!check_manifold(&degenerate));
    }

    #[test]
    fn detects_bad_diagonal() {
        let good = quad_mesh(vec![[0, 1, 3], [1, 2, 3]]);
        assert!(delaunay_violations(&good, 1e-9).is_empty());
        let bad = quad_mesh(vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(delaunay_violations(&bad, 1e-9), vec![[0, 2]]);
    }

    #[test]
    fn ring_crossings() {
        let square = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        assert!(find_ring_crossing(&[&square[..]]).is_none());

        let bow_tie = [p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 2.0)];
        let at = find_ring_crossing(&[&bow_tie[..]]).unwrap();
        assert!((at - p(1.0, 1.0)).norm() < 1e-12);

        let hole = [p(1.0, 1.0), p(3.0, 1.0), p(3.0, 1.5)];
        assert!(find_ring_crossing(&[&square[..], &hole[..]]).is_some());
    }
}
