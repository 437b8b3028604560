//! Interprocedural control flow graph
//!
//! Stitches the CFG of every reachable method together along the edges of
//! a call graph:
//! - Normal: intraprocedural edge not leaving a call site
//! - CallToReturn: call site → each of its intraprocedural successors
//! - Call: call site → callee entry
//! - Return: callee exit → each return site of the call
//!
//! A call site's ordinary out-edges are all replaced by call-to-return
//! edges, so facts about the caller's locals bypass the callee while the
//! callee's effect arrives on the return edges.
//!
//! # References
//! - Reps, Horwitz, Sagiv "Precise Interprocedural Dataflow Analysis via
//!   Graph Reachability" (POPL 1995)

use super::cfg::{Cfg, CfgEdgeKind, CfgNode};
use crate::features::call_graph::domain::MethodCallGraph;
use crate::shared::models::{MethodId, Program, StmtId, VarId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IcfgNode {
    Entry(MethodId),
    Stmt(StmtId),
    Exit(MethodId),
}

impl IcfgNode {
    fn lift(method: MethodId, node: CfgNode) -> Self {
        match node {
            CfgNode::Entry => IcfgNode::Entry(method),
            CfgNode::Stmt(stmt) => IcfgNode::Stmt(stmt),
            CfgNode::Exit => IcfgNode::Exit(method),
        }
    }

    #[inline]
    pub fn as_stmt(&self) -> Option<StmtId> {
        match self {
            IcfgNode::Stmt(stmt) => Some(*stmt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcfgEdge {
    Normal(CfgEdgeKind),
    CallToReturn,
    Call {
        callee: MethodId,
    },
    Return {
        call_site: StmtId,
        callee: MethodId,
        /// Variables returned by the callee
        return_vars: Vec<VarId>,
    },
}

impl IcfgEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcfgEdge::Normal(_) => "NORMAL",
            IcfgEdge::CallToReturn => "CALL_TO_RETURN",
            IcfgEdge::Call { .. } => "CALL",
            IcfgEdge::Return { .. } => "RETURN",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Icfg {
    graph: DiGraph<IcfgNode, IcfgEdge>,
    indices: FxHashMap<IcfgNode, NodeIndex>,
    /// Containing method, indexed by `NodeIndex`
    containers: Vec<MethodId>,
    call_sites: FxHashSet<StmtId>,
    cfgs: FxHashMap<MethodId, Cfg>,
    entry_methods: Vec<MethodId>,
    methods: Vec<MethodId>,
}

impl Icfg {
    /// Build over the reachable methods of `call_graph`
    pub fn build(program: &Program, call_graph: &MethodCallGraph) -> Self {
        let mut icfg = Self {
            graph: DiGraph::new(),
            indices: FxHashMap::default(),
            containers: Vec::new(),
            call_sites: FxHashSet::default(),
            cfgs: FxHashMap::default(),
            entry_methods: call_graph.entry_methods().to_vec(),
            methods: call_graph.reachable_methods().collect(),
        };

        for &method in &icfg.methods {
            let cfg = Cfg::build(program, method);
            for node in cfg.nodes() {
                let lifted = IcfgNode::lift(method, node);
                let idx = icfg.graph.add_node(lifted);
                icfg.indices.insert(lifted, idx);
                icfg.containers.push(method);
            }
            icfg.cfgs.insert(method, cfg);
        }

        for method in icfg.methods.clone() {
            let Some(cfg) = icfg.cfgs.get(&method) else {
                continue;
            };
            let mut edges = Vec::new();
            for node in cfg.nodes() {
                let is_call = node
                    .as_stmt()
                    .is_some_and(|stmt| program.stmt(stmt).is_invoke());
                for (target, kind) in cfg.out_edges(node) {
                    let edge = if is_call {
                        IcfgEdge::CallToReturn
                    } else {
                        IcfgEdge::Normal(kind)
                    };
                    edges.push((IcfgNode::lift(method, node), IcfgNode::lift(method, target), edge));
                }
            }

            for call_site in program.call_sites_in(method) {
                icfg.call_sites.insert(call_site);
                let return_sites: Vec<IcfgNode> = cfg
                    .successors(CfgNode::Stmt(call_site))
                    .into_iter()
                    .map(|n| IcfgNode::lift(method, n))
                    .collect();
                let mut seen = FxHashSet::default();
                for callee in call_graph.callees_of(call_site) {
                    if !seen.insert(callee) || !icfg.indices.contains_key(&IcfgNode::Entry(callee)) {
                        continue;
                    }
                    edges.push((
                        IcfgNode::Stmt(call_site),
                        IcfgNode::Entry(callee),
                        IcfgEdge::Call { callee },
                    ));
                    let return_vars = &program.method(callee).return_vars;
                    for &return_site in &return_sites {
                        edges.push((
                            IcfgNode::Exit(callee),
                            return_site,
                            IcfgEdge::Return {
                                call_site,
                                callee,
                                return_vars: return_vars.clone(),
                            },
                        ));
                    }
                }
            }

            for (source, target, edge) in edges {
                icfg.add_edge(source, target, edge);
            }
        }

        debug!(
            "ICFG: {} methods, {} nodes, {} edges",
            icfg.methods.len(),
            icfg.graph.node_count(),
            icfg.graph.edge_count()
        );
        icfg
    }

    fn add_edge(&mut self, source: IcfgNode, target: IcfgNode, edge: IcfgEdge) {
        if let (Some(&s), Some(&t)) = (self.indices.get(&source), self.indices.get(&target)) {
            self.graph.add_edge(s, t, edge);
        }
    }

    #[inline]
    pub fn entry_of(method: MethodId) -> IcfgNode {
        IcfgNode::Entry(method)
    }

    #[inline]
    pub fn exit_of(method: MethodId) -> IcfgNode {
        IcfgNode::Exit(method)
    }

    #[inline]
    pub fn entry_methods(&self) -> &[MethodId] {
        &self.entry_methods
    }

    /// Methods covered, in call-graph discovery order
    #[inline]
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    pub fn cfg(&self, method: MethodId) -> Option<&Cfg> {
        self.cfgs.get(&method)
    }

    pub fn contains(&self, node: IcfgNode) -> bool {
        self.indices.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = IcfgNode> + '_ {
        self.graph.node_indices().map(move |idx| self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn is_call_site(&self, node: IcfgNode) -> bool {
        node.as_stmt().is_some_and(|stmt| self.call_sites.contains(&stmt))
    }

    pub fn method_of(&self, node: IcfgNode) -> Option<MethodId> {
        self.indices.get(&node).map(|idx| self.containers[idx.index()])
    }

    /// Incoming edges of `node` as `(source, edge)`
    pub fn in_edges(&self, node: IcfgNode) -> Vec<(IcfgNode, &IcfgEdge)> {
        self.edges_directed(node, Direction::Incoming)
    }

    /// Outgoing edges of `node` as `(target, edge)`
    pub fn out_edges(&self, node: IcfgNode) -> Vec<(IcfgNode, &IcfgEdge)> {
        self.edges_directed(node, Direction::Outgoing)
    }

    pub fn successors(&self, node: IcfgNode) -> Vec<IcfgNode> {
        self.out_edges(node).into_iter().map(|(n, _)| n).collect()
    }

    pub fn callees_of(&self, call_site: StmtId) -> Vec<MethodId> {
        self.out_edges(IcfgNode::Stmt(call_site))
            .into_iter()
            .filter_map(|(_, edge)| match edge {
                IcfgEdge::Call { callee } => Some(*callee),
                _ => None,
            })
            .collect()
    }

    /// Intraprocedural successors of a call site
    pub fn return_sites_of(&self, call_site: StmtId) -> Vec<IcfgNode> {
        self.out_edges(IcfgNode::Stmt(call_site))
            .into_iter()
            .filter(|(_, edge)| matches!(edge, IcfgEdge::CallToReturn))
            .map(|(n, _)| n)
            .collect()
    }

    fn edges_directed(&self, node: IcfgNode, direction: Direction) -> Vec<(IcfgNode, &IcfgEdge)> {
        let Some(&idx) = self.indices.get(&node) else {
            return Vec::new();
        };
        let mut edges: Vec<(IcfgNode, &IcfgEdge)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (self.graph[other], e.weight())
            })
            .collect();
        edges.reverse();
        edges
    }

    // ── solver access ──────────────────────────────────────────────

    #[inline]
    pub(crate) fn graph(&self) -> &DiGraph<IcfgNode, IcfgEdge> {
        &self.graph
    }

    #[inline]
    pub(crate) fn index_of(&self, node: IcfgNode) -> Option<NodeIndex> {
        self.indices.get(&node).copied()
    }
}
