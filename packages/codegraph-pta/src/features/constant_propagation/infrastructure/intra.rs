//! Intraprocedural constant propagation client

use crate::features::constant_propagation::domain::{evaluate, CpFact, Value};
use crate::features::dataflow::domain::{Cfg, CfgNode};
use crate::features::dataflow::ports::DataflowAnalysis;
use crate::shared::models::{MethodId, Program, StmtId};

#[derive(Debug, Clone, Copy)]
pub struct ConstantPropagation<'p> {
    program: &'p Program,
}

impl<'p> ConstantPropagation<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    #[inline]
    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Int-like parameters of `method` are unknown on entry
    pub fn boundary_fact(&self, method: MethodId) -> CpFact {
        self.program
            .method(method)
            .params
            .iter()
            .filter(|&&param| self.program.var(param).ty.can_hold_int())
            .map(|&param| (param, Value::NotAConstant))
            .collect()
    }

    /// Rebind the variable defined by `stmt`, if it is int-like
    pub fn transfer_stmt(&self, stmt: StmtId, in_fact: &CpFact) -> CpFact {
        let mut out = in_fact.clone();
        if let Some((lvalue, rhs)) = self.program.stmt(stmt).definition() {
            if self.program.var(lvalue).ty.can_hold_int() {
                out.update(lvalue, evaluate(&rhs, in_fact));
            }
        }
        out
    }
}

impl DataflowAnalysis for ConstantPropagation<'_> {
    type Fact = CpFact;

    fn new_boundary_fact(&self, cfg: &Cfg) -> CpFact {
        self.boundary_fact(cfg.method())
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        target.meet_with(fact);
    }

    fn transfer_node(&self, node: CfgNode, in_fact: &CpFact) -> CpFact {
        match node {
            CfgNode::Stmt(stmt) => self.transfer_stmt(stmt, in_fact),
            CfgNode::Entry | CfgNode::Exit => in_fact.clone(),
        }
    }
}
