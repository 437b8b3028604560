//! Whole-program driver
//!
//! Runs the configured pipeline end to end:
//! 1. Validate the configuration
//! 2. Build the call graph (CHA, or the points-to solver's projection)
//! 3. Build the ICFG over the reachable methods
//! 4. Run interprocedural constant propagation to fixpoint

use crate::config::{AnalysisConfig, CallGraphAlgorithm};
use crate::errors::Result;
use crate::features::call_graph::{CallGraphBuilder, ChaBuilder, MethodCallGraph};
use crate::features::constant_propagation::{ConstantPropagationAnalyzer, CpFact, Value};
use crate::features::dataflow::{DataflowResult, Icfg, IcfgNode};
use crate::features::points_to::{PointerAnalysis, PointerAnalysisResult, PtaStats};
use crate::shared::models::{Program, StmtId, VarId};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct WholeProgramAnalyzer {
    config: AnalysisConfig,
}

impl WholeProgramAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, program: &Program) -> Result<WholeProgramResult> {
        self.config.validate()?;
        info!(
            "Whole-program analysis: preset={}, call graph={:?}, context={:?}",
            self.config.preset, self.config.call_graph, self.config.pta.context
        );

        let (call_graph, pointer_analysis) = match self.config.call_graph {
            CallGraphAlgorithm::Cha => (ChaBuilder::new().build(program)?, None),
            CallGraphAlgorithm::Pta => {
                let result = PointerAnalysis::new(self.config.pta.clone()).analyze(program)?;
                (result.call_graph().clone(), Some(result))
            }
        };

        let icfg = Icfg::build(program, &call_graph);
        let constants =
            ConstantPropagationAnalyzer::new(self.config.dataflow.clone()).analyze_icfg(program, &icfg)?;

        Ok(WholeProgramResult {
            algorithm: self.config.call_graph,
            call_graph,
            pointer_analysis,
            icfg,
            constants,
        })
    }
}

/// Tables produced by [`WholeProgramAnalyzer::run`]
#[derive(Debug)]
pub struct WholeProgramResult {
    algorithm: CallGraphAlgorithm,
    call_graph: MethodCallGraph,
    pointer_analysis: Option<PointerAnalysisResult>,
    icfg: Icfg,
    constants: DataflowResult<IcfgNode, CpFact>,
}

impl WholeProgramResult {
    #[inline]
    pub fn call_graph(&self) -> &MethodCallGraph {
        &self.call_graph
    }

    /// Present when the call graph came from the points-to solver
    #[inline]
    pub fn pointer_analysis(&self) -> Option<&PointerAnalysisResult> {
        self.pointer_analysis.as_ref()
    }

    #[inline]
    pub fn icfg(&self) -> &Icfg {
        &self.icfg
    }

    #[inline]
    pub fn constants(&self) -> &DataflowResult<IcfgNode, CpFact> {
        &self.constants
    }

    /// Value of `var` just before `stmt` executes
    pub fn value_before(&self, stmt: StmtId, var: VarId) -> Value {
        self.constants.in_fact(IcfgNode::Stmt(stmt)).get(var)
    }

    /// Value of `var` just after `stmt` executes
    pub fn value_after(&self, stmt: StmtId, var: VarId) -> Value {
        self.constants.out_fact(IcfgNode::Stmt(stmt)).get(var)
    }

    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            call_graph: self.algorithm,
            reachable_methods: self.call_graph.reachable_count(),
            call_edges: self.call_graph.edge_count(),
            icfg_nodes: self.icfg.node_count(),
            icfg_edges: self.icfg.edge_count(),
            pta: self.pointer_analysis.as_ref().map(|r| r.stats().clone()),
        }
    }
}

/// Run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub call_graph: CallGraphAlgorithm,
    pub reachable_methods: usize,
    pub call_edges: usize,
    pub icfg_nodes: usize,
    pub icfg_edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pta: Option<PtaStats>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ContextSensitivity, Preset};
    use crate::errors::AnalysisError;
    use crate::shared::models::{CallKind, MethodModifiers, MethodRef, ProgramBuilder, Type};

    /// class A { int m() { return 1; } }  class B extends A { int m() { return 2; } }
    /// main: a = new B; x = a.m();
    fn dispatch_program() -> (Program, StmtId, VarId) {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        let bc = b.add_class("B", Some(a));
        for (class, value) in [(a, 1), (bc, 2)] {
            let m = b.add_method(class, "m", &[], Type::INT, MethodModifiers::INSTANCE);
            let r = b.add_var(m, "r", Type::INT);
            b.assign_int(m, r, value);
            b.ret(m, Some(r));
        }
        let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
        let recv = b.add_var(main, "a", Type::class(a));
        let x = b.add_var(main, "x", Type::INT);
        b.alloc(main, recv, Type::class(bc));
        b.invoke(main, Some(x), CallKind::Virtual, MethodRef::new(a, "m()"), Some(recv), &[]);
        let after = b.ret(main, None);
        b.add_entry_method(main);
        (b.build().unwrap(), after, x)
    }

    #[test]
    fn test_pta_call_graph_sharpens_constants() {
        let (program, after, x) = dispatch_program();
        let result = WholeProgramAnalyzer::new(AnalysisConfig::preset(Preset::Balanced))
            .run(&program)
            .unwrap();
        assert_eq!(result.value_before(after, x), Value::Constant(2));
        assert!(result.pointer_analysis().is_some());
    }

    #[test]
    fn test_cha_call_graph_merges_overrides() {
        let (program, after, x) = dispatch_program();
        let result = WholeProgramAnalyzer::new(AnalysisConfig::preset(Preset::Fast))
            .run(&program)
            .unwrap();
        assert_eq!(result.value_before(after, x), Value::NotAConstant);
        assert!(result.pointer_analysis().is_none());

        let report = result.report();
        assert_eq!(report.call_graph, CallGraphAlgorithm::Cha);
        assert_eq!(report.reachable_methods, 3);
        assert_eq!(report.call_edges, 2);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"call_graph\": \"cha\""));
        assert!(!json.contains("\"pta\""));
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let (program, _, _) = dispatch_program();
        let config = AnalysisConfig::preset(Preset::Balanced)
            .pta(|c| c.with_context(ContextSensitivity::Object { k: 0 }));
        let err = WholeProgramAnalyzer::new(config).run(&program).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(ConfigError::Range { .. })));
    }

    #[test]
    fn test_no_entry_method() {
        let mut b = ProgramBuilder::new();
        b.add_class("A", None);
        let program = b.build().unwrap();
        for preset in [Preset::Fast, Preset::Thorough] {
            let err = WholeProgramAnalyzer::new(AnalysisConfig::preset(preset))
                .run(&program)
                .unwrap_err();
            assert!(matches!(err, AnalysisError::NoEntryMethod));
        }
    }
}
