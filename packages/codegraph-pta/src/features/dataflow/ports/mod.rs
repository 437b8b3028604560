//! Ports (Interfaces) for dataflow clients
//!
//! A client supplies its lattice (initial/boundary facts and `meet_into`)
//! and its transfer functions. The solvers own node/edge dispatch and the
//! worklist; clients never see graph indices.
//!
//! Facts flow forward. OUT of a node is computed from IN by the node
//! transfer; IN is the meet over incoming edges, each edge transferring
//! the OUT of its source first (interprocedural only).

use crate::features::dataflow::domain::{Cfg, CfgNode, IcfgNode};
use crate::shared::models::{MethodId, StmtId, VarId};

/// Forward intraprocedural analysis over one [`Cfg`]
pub trait DataflowAnalysis {
    type Fact: Clone + PartialEq;

    /// Fact holding at the entry of the method
    fn new_boundary_fact(&self, cfg: &Cfg) -> Self::Fact;

    /// Bottom: the fact every other node starts from
    fn new_initial_fact(&self) -> Self::Fact;

    /// `target = target ⊓ fact`
    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// OUT of `node` given its IN
    fn transfer_node(&self, node: CfgNode, in_fact: &Self::Fact) -> Self::Fact;
}

/// Forward interprocedural analysis over an [`Icfg`](crate::features::dataflow::domain::Icfg)
pub trait InterDataflowAnalysis {
    type Fact: Clone + PartialEq;

    /// Fact holding at the entry of an entry method
    fn new_boundary_fact(&self, method: MethodId) -> Self::Fact;

    fn new_initial_fact(&self) -> Self::Fact;

    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// OUT of a call site given its IN
    fn transfer_call_node(&self, call_site: StmtId, in_fact: &Self::Fact) -> Self::Fact;

    /// OUT of any other node (entry, exit, non-call statement)
    fn transfer_non_call_node(&self, node: IcfgNode, in_fact: &Self::Fact) -> Self::Fact;

    fn transfer_normal_edge(&self, source: IcfgNode, target: IcfgNode, out: &Self::Fact)
        -> Self::Fact;

    /// Caller-local flow around a call, from the call site to a return site
    fn transfer_call_to_return_edge(&self, call_site: StmtId, out: &Self::Fact) -> Self::Fact;

    /// Flow from the call site into `callee`'s entry
    fn transfer_call_edge(&self, call_site: StmtId, callee: MethodId, out: &Self::Fact)
        -> Self::Fact;

    /// Flow from `callee`'s exit back to a return site of `call_site`
    fn transfer_return_edge(
        &self,
        call_site: StmtId,
        callee: MethodId,
        return_vars: &[VarId],
        exit_out: &Self::Fact,
    ) -> Self::Fact;
}
