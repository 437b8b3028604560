//! High-Level Pointer Analyzer
//!
//! Unified API for whole-program pointer analysis:
//! - Context policy chosen from configuration (or supplied directly)
//! - Result tables exposed through a query interface
//! - Context-insensitive projections of points-to sets and the call graph
//!
//! # Usage
//! ```text
//! use codegraph_pta::config::PtaConfig;
//! use codegraph_pta::features::points_to::PointerAnalysis;
//!
//! let result = PointerAnalysis::new(PtaConfig::default()).analyze(&program)?;
//! let targets = result.call_graph().callees_of(call_site).collect::<Vec<_>>();
//! assert!(result.may_alias(x, y));
//! ```

use crate::config::PtaConfig;
use crate::errors::Result;
use crate::features::call_graph::domain::{Edge, MethodCallGraph};
use crate::features::call_graph::ports::CallGraphBuilder;
use crate::features::points_to::domain::{
    ContextId, HeapModel, ObjId, Pointer, PointerId, PointsToSet,
};
use crate::features::points_to::infrastructure::{
    selector_for, CsCallGraph, CsManager, PointsToSolver, PtaStats,
};
use crate::features::points_to::ports::ContextSelector;
use crate::shared::models::{Program, StmtId, VarId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Pointer analysis entry point
#[derive(Debug, Clone, Default)]
pub struct PointerAnalysis {
    config: PtaConfig,
}

impl PointerAnalysis {
    pub fn new(config: PtaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PtaConfig {
        &self.config
    }

    /// Analyze with the configured context sensitivity
    pub fn analyze(&self, program: &Program) -> Result<PointerAnalysisResult> {
        self.analyze_with(program, selector_for(self.config.context))
    }

    /// Analyze with a caller-supplied context policy
    pub fn analyze_with(
        &self,
        program: &Program,
        selector: Box<dyn ContextSelector>,
    ) -> Result<PointerAnalysisResult> {
        let mut solver =
            PointsToSolver::new(program, selector).with_max_iterations(self.config.max_iterations);
        solver.solve()?;
        Ok(PointerAnalysisResult::from_solver(solver))
    }
}

impl CallGraphBuilder for PointerAnalysis {
    fn name(&self) -> &'static str {
        "pta"
    }

    fn build(&self, program: &Program) -> Result<MethodCallGraph> {
        Ok(self.analyze(program)?.ci_call_graph)
    }
}

/// Final tables of a pointer analysis run
#[derive(Debug)]
pub struct PointerAnalysisResult {
    heap: HeapModel,
    manager: CsManager,
    cs_call_graph: CsCallGraph,
    ci_call_graph: MethodCallGraph,
    var_pointers: FxHashMap<VarId, Vec<PointerId>>,
    stats: PtaStats,
    empty: PointsToSet,
}

impl PointerAnalysisResult {
    fn from_solver(solver: PointsToSolver<'_>) -> Self {
        let PointsToSolver {
            heap,
            manager,
            call_graph,
            stats,
            ..
        } = solver;

        let mut var_pointers: FxHashMap<VarId, Vec<PointerId>> = FxHashMap::default();
        for (id, key, _) in manager.pointers() {
            if let Some((_, var)) = key.as_var() {
                var_pointers.entry(var).or_default().push(id);
            }
        }

        let ci_call_graph = project_call_graph(&manager, &call_graph);

        Self {
            heap,
            manager,
            cs_call_graph: call_graph,
            ci_call_graph,
            var_pointers,
            stats,
            empty: PointsToSet::new(),
        }
    }

    /// Objects `var` may point to under any context
    pub fn points_to(&self, var: VarId) -> Vec<ObjId> {
        let mut objs: Vec<ObjId> = self
            .var_pointers
            .get(&var)
            .into_iter()
            .flatten()
            .flat_map(|&ptr| self.manager.points_to(ptr).objects())
            .map(|cs_obj| self.manager.cs_obj_of(cs_obj).obj)
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        objs.sort();
        objs
    }

    /// Allocation sites of the objects `var` may point to
    pub fn allocation_sites(&self, var: VarId) -> Vec<StmtId> {
        let mut sites: Vec<StmtId> = self
            .points_to(var)
            .into_iter()
            .map(|obj| self.heap.obj(obj).alloc_site)
            .collect();
        sites.sort();
        sites
    }

    /// Points-to set of `var` under `context`; empty if never seen
    pub fn cs_points_to(&self, context: ContextId, var: VarId) -> &PointsToSet {
        self.manager
            .find_pointer(&Pointer::Var { context, var })
            .map(|ptr| self.manager.points_to(ptr))
            .unwrap_or(&self.empty)
    }

    /// Contexts under which `var` has a pointer
    pub fn contexts_of(&self, var: VarId) -> Vec<ContextId> {
        self.var_pointers
            .get(&var)
            .into_iter()
            .flatten()
            .filter_map(|&ptr| self.manager.pointer(ptr).as_var().map(|(ctx, _)| ctx))
            .collect()
    }

    /// Whether two variables may reference the same abstract object
    pub fn may_alias(&self, a: VarId, b: VarId) -> bool {
        let pa = self.points_to(a);
        if pa.is_empty() {
            return false;
        }
        self.points_to(b)
            .iter()
            .any(|obj| pa.binary_search(obj).is_ok())
    }

    /// Every pointer with its final points-to set
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, &Pointer, &PointsToSet)> + '_ {
        self.manager.pointers()
    }

    #[inline]
    pub fn cs_call_graph(&self) -> &CsCallGraph {
        &self.cs_call_graph
    }

    /// Call graph with contexts projected away
    #[inline]
    pub fn call_graph(&self) -> &MethodCallGraph {
        &self.ci_call_graph
    }

    #[inline]
    pub fn heap_model(&self) -> &HeapModel {
        &self.heap
    }

    #[inline]
    pub fn manager(&self) -> &CsManager {
        &self.manager
    }

    #[inline]
    pub fn stats(&self) -> &PtaStats {
        &self.stats
    }
}

fn project_call_graph(manager: &CsManager, cs_graph: &CsCallGraph) -> MethodCallGraph {
    let mut graph = MethodCallGraph::new();
    for &entry in cs_graph.entry_methods() {
        graph.add_entry_method(manager.cs_method_of(entry).method);
    }
    for cs_method in cs_graph.reachable_methods() {
        graph.add_reachable_method(manager.cs_method_of(cs_method).method);
    }
    for edge in cs_graph.edges() {
        graph.add_edge(Edge::new(
            edge.kind,
            manager.cs_method_of(edge.caller).method,
            manager.cs_call_site_of(edge.call_site).call_site,
            manager.cs_method_of(edge.callee).method,
        ));
    }
    graph
}
