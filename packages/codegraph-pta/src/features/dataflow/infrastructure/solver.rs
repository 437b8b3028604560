//! Intraprocedural worklist solver
//!
//! Forward iteration over a single [`Cfg`]:
//! 1. OUT[entry] = boundary, every other IN/OUT = bottom
//! 2. Queue every non-entry node
//! 3. Pop n: IN[n] = ⊓ OUT[p] over predecessors, OUT[n] = transfer(n, IN[n])
//! 4. If OUT[n] changed, queue the successors of n
//!
//! Terminates for monotone transfers over finite-height lattices.

use super::worklist::NodeWorklist;
use crate::errors::{AnalysisError, Result};
use crate::features::dataflow::domain::{Cfg, CfgNode, DataflowResult};
use crate::features::dataflow::ports::DataflowAnalysis;
use tracing::debug;

#[cfg(feature = "trace")]
use tracing::trace;

pub struct DataflowSolver<'a, A> {
    analysis: &'a A,
    max_iterations: Option<usize>,
}

impl<'a, A: DataflowAnalysis> DataflowSolver<'a, A> {
    pub fn new(analysis: &'a A) -> Self {
        Self {
            analysis,
            max_iterations: None,
        }
    }

    /// Fail with [`AnalysisError::IterationLimit`] after `limit` node visits
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    pub fn solve(&self, cfg: &Cfg) -> Result<DataflowResult<CfgNode, A::Fact>> {
        let analysis = self.analysis;
        let mut result = DataflowResult::new(analysis.new_initial_fact());
        let mut worklist = NodeWorklist::new();

        for node in cfg.nodes() {
            if node == CfgNode::Entry {
                result.set_out_fact(node, analysis.new_boundary_fact(cfg));
            } else {
                result.set_in_fact(node, analysis.new_initial_fact());
                result.set_out_fact(node, analysis.new_initial_fact());
                worklist.push(node);
            }
        }

        let mut iterations = 0usize;
        while let Some(node) = worklist.pop() {
            iterations += 1;
            if let Some(limit) = self.max_iterations {
                if iterations > limit {
                    return Err(AnalysisError::IterationLimit {
                        solver: "dataflow solver",
                        limit,
                    });
                }
            }

            let mut in_fact = analysis.new_initial_fact();
            for pred in cfg.predecessors(node) {
                analysis.meet_into(result.out_fact(pred), &mut in_fact);
            }
            let out_fact = analysis.transfer_node(node, &in_fact);
            result.set_in_fact(node, in_fact);

            if out_fact != *result.out_fact(node) {
                #[cfg(feature = "trace")]
                trace!("OUT changed at {:?}", node);
                result.set_out_fact(node, out_fact);
                worklist.extend(cfg.successors(node));
            }
        }

        debug!(
            "Dataflow over method #{} converged after {} node visits",
            cfg.method().0,
            iterations
        );
        Ok(result)
    }
}
