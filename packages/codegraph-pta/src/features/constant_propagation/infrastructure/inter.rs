//! Interprocedural constant propagation client
//!
//! Statements reuse the intraprocedural transfer. Calls are modeled on
//! the edges:
//! - call node: identity
//! - call-to-return: the caller's fact minus the call's result variable
//! - call: arguments bound to the callee's parameters in a fresh fact
//! - return: meet of the callee's return variables bound to an int-like result

use super::intra::ConstantPropagation;
use crate::features::constant_propagation::domain::{CpFact, Value};
use crate::features::dataflow::domain::IcfgNode;
use crate::features::dataflow::ports::InterDataflowAnalysis;
use crate::shared::models::{MethodId, Program, Stmt, StmtId, VarId};

#[derive(Debug, Clone, Copy)]
pub struct InterConstantPropagation<'p> {
    cp: ConstantPropagation<'p>,
}

impl<'p> InterConstantPropagation<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            cp: ConstantPropagation::new(program),
        }
    }

    fn result_var(&self, call_site: StmtId) -> Option<VarId> {
        match self.cp.program().stmt(call_site) {
            Stmt::Invoke { lvalue, .. } => *lvalue,
            _ => None,
        }
    }
}

impl InterDataflowAnalysis for InterConstantPropagation<'_> {
    type Fact = CpFact;

    fn new_boundary_fact(&self, method: MethodId) -> CpFact {
        self.cp.boundary_fact(method)
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        target.meet_with(fact);
    }

    fn transfer_call_node(&self, _call_site: StmtId, in_fact: &CpFact) -> CpFact {
        in_fact.clone()
    }

    fn transfer_non_call_node(&self, node: IcfgNode, in_fact: &CpFact) -> CpFact {
        match node {
            IcfgNode::Stmt(stmt) => self.cp.transfer_stmt(stmt, in_fact),
            IcfgNode::Entry(_) | IcfgNode::Exit(_) => in_fact.clone(),
        }
    }

    fn transfer_normal_edge(&self, _source: IcfgNode, _target: IcfgNode, out: &CpFact) -> CpFact {
        out.clone()
    }

    fn transfer_call_to_return_edge(&self, call_site: StmtId, out: &CpFact) -> CpFact {
        let mut fact = out.clone();
        if let Some(lvalue) = self.result_var(call_site) {
            fact.remove(lvalue);
        }
        fact
    }

    fn transfer_call_edge(&self, call_site: StmtId, callee: MethodId, out: &CpFact) -> CpFact {
        let program = self.cp.program();
        let Some((_, invoke)) = program.stmt(call_site).as_invoke() else {
            return CpFact::new();
        };
        program
            .method(callee)
            .params
            .iter()
            .zip(&invoke.args)
            .map(|(&param, &arg)| (param, out.get(arg)))
            .collect()
    }

    fn transfer_return_edge(
        &self,
        call_site: StmtId,
        _callee: MethodId,
        return_vars: &[VarId],
        exit_out: &CpFact,
    ) -> CpFact {
        let mut fact = CpFact::new();
        let program = self.cp.program();
        if let Some(lvalue) = self
            .result_var(call_site)
            .filter(|&lvalue| program.var(lvalue).ty.can_hold_int())
        {
            let value = return_vars
                .iter()
                .fold(Value::Undefined, |acc, &var| acc.meet(exit_out.get(var)));
            fact.update(lvalue, value);
        }
        fact
    }
}
