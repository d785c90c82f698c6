slotmap::new_key_type! {
    /// Key of a triangle in a sweep context.
    pub(crate) struct TriangleId;
}

/// Counter-clockwise triangle over point indices.
///
/// Slot `i` of `neighbors`, `constrained` and `delaunay` refers to the edge
/// opposite `points[i]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Triangle {
    pub points: [usize; 3],
    pub neighbors: [Option<TriangleId>; 3],
    pub constrained: [bool; 3],
    pub delaunay: [bool; 3],
    pub interior: bool,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            points: [a, b, c],
            neighbors: [None; 3],
            constrained: [false; 3],
            delaunay: [false; 3],
            interior: false,
        }
    }

    pub fn index(&self, p: usize) -> Option<usize> {
        self.points.iter().position(|&q| q == p)
    }

    pub fn contains(&self, p: usize) -> bool {
        self.points.contains(&p)
    }

    pub fn contains_edge(&self, p: usize, q: usize) -> bool {
        self.contains(p) && self.contains(q)
    }

    /// Slot of the edge `p`–`q`, in either direction.
    pub fn edge_index(&self, p: usize, q: usize) -> Option<usize> {
        let i = self.index(p)?;
        let j = self.index(q)?;
        (i != j).then(|| 3 - i - j)
    }

    /// Slot of `p`; points not on the triangle resolve to the last slot.
    fn slot(&self, p: usize) -> usize {
        self.index(p).unwrap_or(2)
    }

    pub fn point_cw(&self, p: usize) -> usize {
        self.points[(self.slot(p) + 2) % 3]
    }

    pub fn point_ccw(&self, p: usize) -> usize {
        self.points[(self.slot(p) + 1) % 3]
    }

    pub fn neighbor_cw(&self, p: usize) -> Option<TriangleId> {
        self.neighbors[(self.slot(p) + 1) % 3]
    }

    pub fn neighbor_ccw(&self, p: usize) -> Option<TriangleId> {
        self.neighbors[(self.slot(p) + 2) % 3]
    }

    pub fn neighbor_across(&self, p: usize) -> Option<TriangleId> {
        self.neighbors[self.slot(p)]
    }

    pub fn constrained_cw(&self, p: usize) -> bool {
        self.constrained[(self.slot(p) + 1) % 3]
    }

    pub fn constrained_ccw(&self, p: usize) -> bool {
        self.constrained[(self.slot(p) + 2) % 3]
    }

    pub fn set_constrained_cw(&mut self, p: usize, on: bool) {
        self.constrained[(self.slot(p) + 1) % 3] = on;
    }

    pub fn set_constrained_ccw(&mut self, p: usize, on: bool) {
        self.constrained[(self.slot(p) + 2) % 3] = on;
    }

    pub fn delaunay_cw(&self, p: usize) -> bool {
        self.delaunay[(self.slot(p) + 1) % 3]
    }

    pub fn delaunay_ccw(&self, p: usize) -> bool {
        self.delaunay[(self.slot(p) + 2) % 3]
    }

    pub fn set_delaunay_cw(&mut self, p: usize, on: bool) {
        self.delaunay[(self.slot(p) + 1) % 3] = on;
    }

    pub fn set_delaunay_ccw(&mut self, p: usize, on: bool) {
        self.delaunay[(self.slot(p) + 2) % 3] = on;
    }

    pub fn mark_constrained_edge(&mut self, p: usize, q: usize) {
        if let Some(i) = self.edge_index(p, q) {
            self.constrained[i] = true;
        }
    }

    /// Records `t` as the neighbour across the edge `p`–`q`.
    pub fn set_neighbor_across(&mut self, p: usize, q: usize, t: TriangleId) {
        if let Some(i) = self.edge_index(p, q) {
            self.neighbors[i] = Some(t);
        }
    }

    pub fn clear_neighbors(&mut self) {
        self.neighbors = [None; 3];
    }

    pub fn clear_delaunay(&mut self) {
        self.delaunay = [false; 3];
    }

    /// Rotates the triangle one step around `opoint`, replacing the point
    /// counter-clockwise of it with `npoint`.
    pub fn rotate(&mut self, opoint: usize, npoint: usize) {
        let [a, b, c] = self.points;
        if opoint == a {
            self.points = [c, a, npoint];
        } else if opoint == b {
            self.points = [npoint, a, b];
        } else if opoint == c {
            self.points = [c, npoint, b];
        }
    }
}
