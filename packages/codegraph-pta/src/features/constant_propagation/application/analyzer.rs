//! Constant propagation entry points
//!
//! Wires the clients to the solvers with the configured iteration bound.

use crate::config::DataflowConfig;
use crate::errors::Result;
use crate::features::constant_propagation::domain::CpFact;
use crate::features::constant_propagation::infrastructure::{
    ConstantPropagation, InterConstantPropagation,
};
use crate::features::dataflow::domain::{Cfg, CfgNode, DataflowResult, Icfg, IcfgNode};
use crate::features::dataflow::infrastructure::{DataflowSolver, InterSolver};
use crate::shared::models::{MethodId, Program};

#[derive(Debug, Clone, Default)]
pub struct ConstantPropagationAnalyzer {
    config: DataflowConfig,
}

impl ConstantPropagationAnalyzer {
    pub fn new(config: DataflowConfig) -> Self {
        Self { config }
    }

    /// Constants within one method, calls treated as opaque
    pub fn analyze_method(
        &self,
        program: &Program,
        method: MethodId,
    ) -> Result<DataflowResult<CfgNode, CpFact>> {
        let cfg = Cfg::build(program, method);
        let client = ConstantPropagation::new(program);
        DataflowSolver::new(&client)
            .with_max_iterations(self.config.max_iterations)
            .solve(&cfg)
    }

    /// Constants across calls, over an ICFG built from any call graph
    pub fn analyze_icfg(
        &self,
        program: &Program,
        icfg: &Icfg,
    ) -> Result<DataflowResult<IcfgNode, CpFact>> {
        let client = InterConstantPropagation::new(program);
        InterSolver::new(&client, icfg)
            .with_max_iterations(self.config.max_iterations)
            .solve()
    }
}
