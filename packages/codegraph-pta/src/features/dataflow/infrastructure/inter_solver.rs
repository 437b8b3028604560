//! Interprocedural worklist solver
//!
//! Same iteration scheme as the intraprocedural solver, but every incoming
//! edge transfers its source's OUT before the meet:
//! - Normal / CallToReturn / Call / Return edges dispatch to the matching
//!   client transfer
//! - Call sites use `transfer_call_node`, everything else
//!   `transfer_non_call_node`
//!
//! Entry nodes of entry methods start from the boundary fact; every other
//! node starts from bottom. All nodes are queued initially.

use super::worklist::NodeWorklist;
use crate::errors::{AnalysisError, Result};
use crate::features::dataflow::domain::{DataflowResult, Icfg, IcfgEdge, IcfgNode};
use crate::features::dataflow::ports::InterDataflowAnalysis;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;
use tracing::info;

#[cfg(feature = "trace")]
use tracing::trace;

pub struct InterSolver<'a, A: InterDataflowAnalysis> {
    analysis: &'a A,
    icfg: &'a Icfg,
    max_iterations: Option<usize>,
}

impl<'a, A: InterDataflowAnalysis> InterSolver<'a, A> {
    pub fn new(analysis: &'a A, icfg: &'a Icfg) -> Self {
        Self {
            analysis,
            icfg,
            max_iterations: None,
        }
    }

    /// Fail with [`AnalysisError::IterationLimit`] after `limit` node visits
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    pub fn solve(&self) -> Result<DataflowResult<IcfgNode, A::Fact>> {
        let analysis = self.analysis;
        let graph = self.icfg.graph();
        let mut result = DataflowResult::new(analysis.new_initial_fact());

        for node in self.icfg.nodes() {
            result.set_in_fact(node, analysis.new_initial_fact());
            result.set_out_fact(node, analysis.new_initial_fact());
        }

        let mut boundaries: FxHashMap<NodeIndex, A::Fact> = FxHashMap::default();
        for &method in self.icfg.entry_methods() {
            let entry = Icfg::entry_of(method);
            if let Some(idx) = self.icfg.index_of(entry) {
                let boundary = analysis.new_boundary_fact(method);
                result.set_out_fact(entry, boundary.clone());
                boundaries.insert(idx, boundary);
            }
        }

        let mut worklist = NodeWorklist::new();
        worklist.extend(graph.node_indices());

        let mut iterations = 0usize;
        while let Some(idx) = worklist.pop() {
            iterations += 1;
            if let Some(limit) = self.max_iterations {
                if iterations > limit {
                    return Err(AnalysisError::IterationLimit {
                        solver: "interprocedural dataflow solver",
                        limit,
                    });
                }
            }

            let node = graph[idx];
            let mut in_fact = match boundaries.get(&idx) {
                Some(boundary) => boundary.clone(),
                None => analysis.new_initial_fact(),
            };
            for edge in graph.edges_directed(idx, Direction::Incoming) {
                let source = graph[edge.source()];
                if let Some(fact) = self.transfer_edge(source, node, edge.weight(), result.out_fact(source)) {
                    analysis.meet_into(&fact, &mut in_fact);
                }
            }

            let out_fact = match node {
                IcfgNode::Stmt(stmt) if self.icfg.is_call_site(node) => {
                    analysis.transfer_call_node(stmt, &in_fact)
                }
                _ => analysis.transfer_non_call_node(node, &in_fact),
            };
            result.set_in_fact(node, in_fact);

            if out_fact != *result.out_fact(node) {
                #[cfg(feature = "trace")]
                trace!("OUT changed at {:?}", node);
                result.set_out_fact(node, out_fact);
                worklist.extend(graph.neighbors_directed(idx, Direction::Outgoing));
            }
        }

        info!(
            "Interprocedural dataflow converged: {} methods, {} nodes, {} node visits",
            self.icfg.methods().len(),
            self.icfg.node_count(),
            iterations
        );
        Ok(result)
    }

    /// `None` for a call-flavored edge whose source is not a statement,
    /// which `Icfg::build` never produces
    fn transfer_edge(
        &self,
        source: IcfgNode,
        target: IcfgNode,
        edge: &IcfgEdge,
        out: &A::Fact,
    ) -> Option<A::Fact> {
        let analysis = self.analysis;
        match edge {
            IcfgEdge::Normal(_) => Some(analysis.transfer_normal_edge(source, target, out)),
            IcfgEdge::CallToReturn => source
                .as_stmt()
                .map(|call_site| analysis.transfer_call_to_return_edge(call_site, out)),
            IcfgEdge::Call { callee } => source
                .as_stmt()
                .map(|call_site| analysis.transfer_call_edge(call_site, *callee, out)),
            IcfgEdge::Return {
                call_site,
                callee,
                return_vars,
            } => Some(analysis.transfer_return_edge(*call_site, *callee, return_vars, out)),
        }
    }
}
