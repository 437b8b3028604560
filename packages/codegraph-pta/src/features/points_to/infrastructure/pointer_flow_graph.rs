//! Pointer flow graph
//!
//! Directed propagation graph over pointers: an edge `s -> t` means every
//! object `s` may point to must also reach `t`. Edges are only ever added.

use crate::features::points_to::domain::PointerId;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

#[derive(Debug, Clone, Default)]
pub struct PointerFlowGraph {
    graph: DiGraphMap<PointerId, ()>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the edge is new
    pub fn add_edge(&mut self, source: PointerId, target: PointerId) -> bool {
        if self.graph.contains_edge(source, target) {
            return false;
        }
        self.graph.add_edge(source, target, ());
        true
    }

    /// Targets of `pointer`; empty for pointers with no out-edges
    pub fn successors_of(&self, pointer: PointerId) -> impl Iterator<Item = PointerId> + '_ {
        self.graph.neighbors_directed(pointer, Direction::Outgoing)
    }

    #[inline]
    pub fn has_edge(&self, source: PointerId, target: PointerId) -> bool {
        self.graph.contains_edge(source, target)
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
