use slotmap::SlotMap;

use super::triangle::TriangleId;

slotmap::new_key_type! {
    /// Key of an advancing-front node.
    pub(crate) struct NodeId;
}

/// Entry of the advancing front, ordered by `value` (the point's x).
///
/// Nodes dropped from the front keep their links so that a walk that
/// starts on one still reaches the live front.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub point: usize,
    pub triangle: Option<TriangleId>,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub value: f64,
}

impl Node {
    pub fn new(point: usize, value: f64, triangle: Option<TriangleId>) -> Self {
        Self {
            point,
            triangle,
            next: None,
            prev: None,
            value,
        }
    }
}

/// The lower hull of the triangulated region, left to right.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdvancingFront {
    pub head: NodeId,
    search: NodeId,
}

impl AdvancingFront {
    pub fn new(head: NodeId) -> Self {
        Self { head, search: head }
    }

    /// Node whose span `[value, next.value)` holds `x`.
    pub fn locate_node(&mut self, nodes: &SlotMap<NodeId, Node>, x: f64) -> Option<NodeId> {
        let mut node = self.search;
        if x < nodes[node].value {
            while let Some(prev) = nodes[node].prev {
                node = prev;
                if x >= nodes[node].value {
                    self.search = node;
                    return Some(node);
                }
            }
        } else {
            while let Some(next) = nodes[node].next {
                node = next;
                if x < nodes[node].value {
                    let prev = nodes[node].prev?;
                    self.search = prev;
                    return Some(prev);
                }
            }
        }
        None
    }

    /// Node holding `point`, whose x coordinate is `x`.
    #[allow(clippy::float_cmp)]
    pub fn locate_point(
        &mut self,
        nodes: &SlotMap<NodeId, Node>,
        point: usize,
        x: f64,
    ) -> Option<NodeId> {
        let search = self.search;
        let found = if x == nodes[search].value {
            // Two nodes may share an x value for a short while.
            if nodes[search].point == point {
                Some(search)
            } else {
                [nodes[search].prev, nodes[search].next]
                    .into_iter()
                    .flatten()
                    .find(|&n| nodes[n].point == point)
            }
        } else {
            let step = |n: NodeId| {
                if x < nodes[search].value {
                    nodes[n].prev
                } else {
                    nodes[n].next
                }
            };
            let mut cur = step(search);
            while let Some(n) = cur {
                if nodes[n].point == point {
                    break;
                }
                cur = step(n);
            }
            cur
        };
        if let Some(n) = found {
            self.search = n;
        }
        found
    }
}
