//! Intraprocedural control flow graph
//!
//! One node per statement plus artificial entry and exit nodes. Every
//! `Return` and the fall-through off the end of the body reach the exit.
//!
//! Edge kinds:
//! - FallThrough: sequential flow to the next statement
//! - Goto: unconditional jump
//! - IfTrue / IfFalse: the two branches of a conditional
//! - Return: `return` to the exit node

use crate::shared::models::{MethodId, Program, Stmt, StmtId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CfgNode {
    Entry,
    Stmt(StmtId),
    Exit,
}

impl CfgNode {
    #[inline]
    pub fn as_stmt(&self) -> Option<StmtId> {
        match self {
            CfgNode::Stmt(stmt) => Some(*stmt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CfgEdgeKind {
    FallThrough,
    Goto,
    IfTrue,
    IfFalse,
    Return,
    /// Entry to the first statement (or straight to exit for an empty body)
    Entry,
}

impl CfgEdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CfgEdgeKind::FallThrough => "FALL_THROUGH",
            CfgEdgeKind::Goto => "GOTO",
            CfgEdgeKind::IfTrue => "IF_TRUE",
            CfgEdgeKind::IfFalse => "IF_FALSE",
            CfgEdgeKind::Return => "RETURN",
            CfgEdgeKind::Entry => "ENTRY",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cfg {
    method: MethodId,
    graph: DiGraph<CfgNode, CfgEdgeKind>,
    indices: FxHashMap<CfgNode, NodeIndex>,
}

impl Cfg {
    /// Build the CFG of `method`
    ///
    /// Methods without a body (abstract, native) get a single
    /// entry → exit edge.
    pub fn build(program: &Program, method: MethodId) -> Self {
        let body = program.body(method);
        let mut graph = DiGraph::with_capacity(body.len() + 2, body.len() + 2);
        let mut indices = FxHashMap::default();

        let entry = graph.add_node(CfgNode::Entry);
        indices.insert(CfgNode::Entry, entry);
        let stmt_nodes: Vec<NodeIndex> = body
            .iter()
            .map(|&stmt| {
                let idx = graph.add_node(CfgNode::Stmt(stmt));
                indices.insert(CfgNode::Stmt(stmt), idx);
                idx
            })
            .collect();
        let exit = graph.add_node(CfgNode::Exit);
        indices.insert(CfgNode::Exit, exit);

        // Index past the end of the body means "exit"
        let node_at = |i: usize| stmt_nodes.get(i).copied().unwrap_or(exit);

        graph.add_edge(entry, node_at(0), CfgEdgeKind::Entry);
        for (i, &stmt) in body.iter().enumerate() {
            let source = stmt_nodes[i];
            match program.stmt(stmt) {
                Stmt::Goto { target } => {
                    graph.add_edge(source, node_at(*target), CfgEdgeKind::Goto);
                }
                Stmt::If { target, .. } => {
                    graph.add_edge(source, node_at(*target), CfgEdgeKind::IfTrue);
                    graph.add_edge(source, node_at(i + 1), CfgEdgeKind::IfFalse);
                }
                Stmt::Return { .. } => {
                    graph.add_edge(source, exit, CfgEdgeKind::Return);
                }
                _ => {
                    graph.add_edge(source, node_at(i + 1), CfgEdgeKind::FallThrough);
                }
            }
        }

        Self {
            method,
            graph,
            indices,
        }
    }

    #[inline]
    pub fn method(&self) -> MethodId {
        self.method
    }

    #[inline]
    pub fn entry(&self) -> CfgNode {
        CfgNode::Entry
    }

    #[inline]
    pub fn exit(&self) -> CfgNode {
        CfgNode::Exit
    }

    pub fn contains(&self, node: CfgNode) -> bool {
        self.indices.contains_key(&node)
    }

    /// All nodes: entry, statements in body order, exit
    pub fn nodes(&self) -> impl Iterator<Item = CfgNode> + '_ {
        self.graph.node_indices().map(move |idx| self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Incoming edges of `node` as `(source, kind)`
    pub fn in_edges(&self, node: CfgNode) -> Vec<(CfgNode, CfgEdgeKind)> {
        self.edges_directed(node, Direction::Incoming)
    }

    /// Outgoing edges of `node` as `(target, kind)`
    pub fn out_edges(&self, node: CfgNode) -> Vec<(CfgNode, CfgEdgeKind)> {
        self.edges_directed(node, Direction::Outgoing)
    }

    pub fn predecessors(&self, node: CfgNode) -> Vec<CfgNode> {
        self.in_edges(node).into_iter().map(|(n, _)| n).collect()
    }

    pub fn successors(&self, node: CfgNode) -> Vec<CfgNode> {
        self.out_edges(node).into_iter().map(|(n, _)| n).collect()
    }

    fn edges_directed(&self, node: CfgNode, direction: Direction) -> Vec<(CfgNode, CfgEdgeKind)> {
        let Some(&idx) = self.indices.get(&node) else {
            return Vec::new();
        };
        // petgraph lists edges newest first
        let mut edges: Vec<(CfgNode, CfgEdgeKind)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (self.graph[other], *e.weight())
            })
            .collect();
        edges.reverse();
        edges
    }
}
