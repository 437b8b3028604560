//! Context-sensitive points-to solver with on-the-fly call graph
//!
//! Inclusion-based (Andersen-style) analysis over a pointer flow graph,
//! discovering reachable methods as receiver objects become known:
//! - **add_reachable**: processes a method body once per context, seeding
//!   allocations and wiring copy, static-field and static-call edges
//! - **propagate**: pushes only the delta of a pointer's incoming set
//!   along its PFG successors
//! - **lazy heap edges**: instance field, array and instance-call handling
//!   is materialized per receiver object once it reaches a variable
//!
//! # Termination
//! Contexts are k-limited and heap objects are allocation sites, so every
//! growing quantity (points-to sets, PFG edges, call edges, reachable
//! methods) is drawn from a finite domain. The loop only does work when
//! one of them strictly grows.
//!
//! # References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Lhoták & Hendren "Context-Sensitive Points-to Analysis: Is It Worth It?" (CC 2006)
//! - Tan et al. "Tai-e: A Developer-Friendly Static Analysis Framework" (ISSTA 2023)

use super::cs_manager::CsManager;
use super::pointer_flow_graph::PointerFlowGraph;
use super::worklist::PtaWorklist;
use crate::errors::{AnalysisError, Result};
use crate::features::call_graph::domain::{CallGraph, Edge};
use crate::features::call_graph::infrastructure::{resolve_callee, resolve_static};
use crate::features::points_to::domain::{
    ContextId, CsCallSiteId, CsMethodId, CsObjId, HeapModel, PointerId, PointsToSet,
};
use crate::features::points_to::ports::{ContextSelector, ReceiverObj};
use crate::shared::models::{CallKind, MethodId, Program, Stmt, StmtId, VarId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "trace")]
use tracing::trace;

/// Context-sensitive call graph produced by the solver
pub type CsCallGraph = CallGraph<CsCallSiteId, CsMethodId>;

/// Statistics for a points-to run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtaStats {
    /// Worklist entries processed
    pub iterations: usize,
    /// Entries whose delta was empty
    pub empty_deltas: usize,
    pub reachable_methods: usize,
    pub call_edges: usize,
    pub pfg_edges: usize,
    pub pointers: usize,
    pub contexts: usize,
    /// Allocation-site objects
    pub objects: usize,
    /// Objects under heap contexts
    pub cs_objects: usize,
}

/// Worklist solver state for one run
pub struct PointsToSolver<'p> {
    program: &'p Program,
    selector: Box<dyn ContextSelector>,
    max_iterations: Option<usize>,
    pub(crate) heap: HeapModel,
    pub(crate) manager: CsManager,
    pub(crate) pfg: PointerFlowGraph,
    pub(crate) call_graph: CsCallGraph,
    worklist: PtaWorklist,
    pub(crate) stats: PtaStats,
}

impl<'p> PointsToSolver<'p> {
    pub fn new(program: &'p Program, selector: Box<dyn ContextSelector>) -> Self {
        Self {
            program,
            selector,
            max_iterations: None,
            heap: HeapModel::new(),
            manager: CsManager::new(),
            pfg: PointerFlowGraph::new(),
            call_graph: CsCallGraph::new(),
            worklist: PtaWorklist::new(),
            stats: PtaStats::default(),
        }
    }

    /// Fail with [`AnalysisError::IterationLimit`] after `limit` worklist entries
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Run to fixpoint
    pub fn solve(&mut self) -> Result<()> {
        self.initialize()?;
        self.analyze()?;
        self.finish_stats();
        info!(
            "Points-to analysis ({}) converged: {} iterations, {} reachable methods, {} call edges, {} PFG edges, {} pointers, {} contexts",
            self.selector.name(),
            self.stats.iterations,
            self.stats.reachable_methods,
            self.stats.call_edges,
            self.stats.pfg_edges,
            self.stats.pointers,
            self.stats.contexts
        );
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        let program = self.program;
        if program.entry_methods().is_empty() {
            return Err(AnalysisError::NoEntryMethod);
        }
        let empty = self.manager.empty_context();
        for &entry in program.entry_methods() {
            let cs_entry = self.manager.cs_method(empty, entry);
            self.call_graph.add_entry_method(cs_entry);
            self.add_reachable(cs_entry)?;
        }
        Ok(())
    }

    // ── reachability ───────────────────────────────────────────────

    /// Mark `root` reachable and process its body
    ///
    /// Static callees found along the way are processed from an explicit
    /// stack, so long static call chains do not recurse.
    fn add_reachable(&mut self, root: CsMethodId) -> Result<()> {
        let program = self.program;
        let mut pending = vec![root];

        while let Some(cs_method) = pending.pop() {
            if !self.call_graph.add_reachable_method(cs_method) {
                continue;
            }
            let method = self.manager.cs_method_of(cs_method).method;
            let context = self.manager.cs_method_of(cs_method).context;
            debug!(
                "Reachable: {} under {}",
                program.method_signature(method),
                self.manager.context_of(context)
            );
            if !program.method(method).has_body() {
                continue;
            }

            for &stmt_id in program.body(method) {
                match program.stmt(stmt_id) {
                    Stmt::New { lvalue, .. } => {
                        self.handle_new(context, method, stmt_id, *lvalue);
                    }
                    Stmt::Copy { lvalue, rvalue } => {
                        let source = self.manager.var_ptr(context, *rvalue);
                        let target = self.manager.var_ptr(context, *lvalue);
                        self.add_pfg_edge(source, target);
                    }
                    Stmt::LoadField {
                        lvalue,
                        base: None,
                        field,
                    } => {
                        let source = self.manager.static_field(*field);
                        let target = self.manager.var_ptr(context, *lvalue);
                        self.add_pfg_edge(source, target);
                    }
                    Stmt::StoreField {
                        base: None,
                        field,
                        rvalue,
                    } => {
                        let source = self.manager.var_ptr(context, *rvalue);
                        let target = self.manager.static_field(*field);
                        self.add_pfg_edge(source, target);
                    }
                    Stmt::Invoke { invoke, .. } if invoke.kind == CallKind::Static => {
                        let callee = resolve_static(program, &invoke.method_ref)?;
                        let callee_context = self.selector.select_context(
                            self.manager.context_of(context),
                            stmt_id,
                            callee,
                        );
                        let callee_context = self.manager.context(callee_context);
                        let cs_callee = self.manager.cs_method(callee_context, callee);
                        let cs_site = self.manager.cs_call_site(context, stmt_id);
                        if self.add_call_edge(CallKind::Static, cs_method, cs_site, cs_callee)? {
                            pending.push(cs_callee);
                        }
                    }
                    // instance field/array accesses and instance calls wait for receiver objects
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn handle_new(&mut self, context: ContextId, method: MethodId, site: StmtId, lvalue: VarId) {
        let Some(obj) = self.heap.obj_for(self.program, site) else {
            return;
        };
        let heap_context =
            self.selector
                .select_heap_context(self.manager.context_of(context), method, obj);
        let heap_context = self.manager.context(heap_context);
        let cs_obj = self.manager.cs_obj(heap_context, obj);
        let pointer = self.manager.var_ptr(context, lvalue);
        self.worklist.push(pointer, PointsToSet::singleton(cs_obj));
    }

    // ── propagation ────────────────────────────────────────────────

    fn analyze(&mut self) -> Result<()> {
        while let Some((pointer, incoming)) = self.worklist.pop() {
            self.stats.iterations += 1;
            if let Some(limit) = self.max_iterations {
                if self.stats.iterations > limit {
                    return Err(AnalysisError::IterationLimit {
                        solver: "points-to solver",
                        limit,
                    });
                }
            }
            self.process_entry(pointer, &incoming)?;
        }
        Ok(())
    }

    /// Handle one worklist entry: propagate, then wire heap and call edges
    /// for each object new to a variable
    fn process_entry(&mut self, pointer: PointerId, incoming: &PointsToSet) -> Result<()> {
        let program = self.program;
        let delta = self.propagate(pointer, incoming);
        if delta.is_empty() {
            self.stats.empty_deltas += 1;
            return Ok(());
        }

        #[cfg(feature = "trace")]
        trace!(
            "Propagated {} new objects to {} pointer #{}",
            delta.len(),
            self.manager.pointer(pointer).kind_str(),
            pointer.0
        );

        let Some((context, var)) = self.manager.pointer(pointer).as_var() else {
            return Ok(());
        };
        let index = program.var_index(var);
        for cs_obj in delta.objects() {
            for &stmt_id in &index.store_fields {
                if let Stmt::StoreField { field, rvalue, .. } = program.stmt(stmt_id) {
                    let source = self.manager.var_ptr(context, *rvalue);
                    let target = self.manager.instance_field(cs_obj, *field);
                    self.add_pfg_edge(source, target);
                }
            }
            for &stmt_id in &index.load_fields {
                if let Stmt::LoadField { lvalue, field, .. } = program.stmt(stmt_id) {
                    let source = self.manager.instance_field(cs_obj, *field);
                    let target = self.manager.var_ptr(context, *lvalue);
                    self.add_pfg_edge(source, target);
                }
            }
            for &stmt_id in &index.store_arrays {
                if let Stmt::StoreArray { rvalue, .. } = program.stmt(stmt_id) {
                    let source = self.manager.var_ptr(context, *rvalue);
                    let target = self.manager.array_index(cs_obj);
                    self.add_pfg_edge(source, target);
                }
            }
            for &stmt_id in &index.load_arrays {
                if let Stmt::LoadArray { lvalue, .. } = program.stmt(stmt_id) {
                    let source = self.manager.array_index(cs_obj);
                    let target = self.manager.var_ptr(context, *lvalue);
                    self.add_pfg_edge(source, target);
                }
            }
            self.process_call(context, var, cs_obj)?;
        }
        Ok(())
    }

    /// Union the new part of `incoming` into `pointer` and forward it
    ///
    /// Returns the delta (empty if nothing changed).
    fn propagate(&mut self, pointer: PointerId, incoming: &PointsToSet) -> PointsToSet {
        let delta = self.manager.points_to(pointer).difference(incoming);
        if !delta.is_empty() {
            self.manager.points_to_mut(pointer).union_with(&delta);
            let successors: Vec<PointerId> = self.pfg.successors_of(pointer).collect();
            for successor in successors {
                self.worklist.push(successor, delta.clone());
            }
        }
        delta
    }

    /// Add a PFG edge; a new edge re-propagates everything the source holds
    fn add_pfg_edge(&mut self, source: PointerId, target: PointerId) {
        if self.pfg.add_edge(source, target) {
            let pts = self.manager.points_to(source);
            if !pts.is_empty() {
                self.worklist.push(target, pts.clone());
            }
        }
    }

    // ── calls ──────────────────────────────────────────────────────

    /// Resolve every call on `var` for a newly discovered receiver object
    fn process_call(&mut self, context: ContextId, var: VarId, receiver: CsObjId) -> Result<()> {
        let program = self.program;
        let recv = self.manager.cs_obj_of(receiver);

        for &call_site in &program.var_index(var).invokes {
            let Some((_, invoke)) = program.stmt(call_site).as_invoke() else {
                continue;
            };
            let obj = self.heap.obj(recv.obj);
            let callee = resolve_callee(program, Some(&obj.ty), invoke)?;

            let callee_context = self.selector.select_instance_context(
                self.manager.context_of(context),
                call_site,
                ReceiverObj {
                    id: recv.obj,
                    obj,
                    heap_context: self.manager.context_of(recv.context),
                },
                callee,
            );
            let callee_context = self.manager.context(callee_context);
            let cs_callee = self.manager.cs_method(callee_context, callee);

            if let Some(this) = program.method(callee).this {
                let this_ptr = self.manager.var_ptr(callee_context, this);
                self.worklist.push(this_ptr, PointsToSet::singleton(receiver));
            }

            let caller = self
                .manager
                .cs_method(context, program.container_of(call_site));
            let cs_site = self.manager.cs_call_site(context, call_site);
            if self.add_call_edge(invoke.kind, caller, cs_site, cs_callee)? {
                self.add_reachable(cs_callee)?;
            }
        }
        Ok(())
    }

    /// Add a call edge; when new, wire argument and return value flows
    fn add_call_edge(
        &mut self,
        kind: CallKind,
        caller: CsMethodId,
        cs_site: CsCallSiteId,
        cs_callee: CsMethodId,
    ) -> Result<bool> {
        if !self
            .call_graph
            .add_edge(Edge::new(kind, caller, cs_site, cs_callee))
        {
            return Ok(false);
        }

        let program = self.program;
        let site = self.manager.cs_call_site_of(cs_site);
        let callee = self.manager.cs_method_of(cs_callee);
        let callee_info = program.method(callee.method);
        let Some((result, invoke)) = program.stmt(site.call_site).as_invoke() else {
            return Ok(true);
        };
        debug!(
            "Call edge [{}] {} -> {}",
            kind.as_str(),
            program.stmt_label(site.call_site),
            program.method_signature(callee.method)
        );

        if invoke.args.len() != callee_info.params.len() {
            return Err(AnalysisError::ArityMismatch {
                call_site: program.stmt_label(site.call_site),
                callee: program.method_signature(callee.method),
                expected: callee_info.params.len(),
                found: invoke.args.len(),
            });
        }

        for (&arg, &param) in invoke.args.iter().zip(&callee_info.params) {
            let source = self.manager.var_ptr(site.context, arg);
            let target = self.manager.var_ptr(callee.context, param);
            self.add_pfg_edge(source, target);
        }
        if let Some(result) = result {
            for &ret in &callee_info.return_vars {
                let source = self.manager.var_ptr(callee.context, ret);
                let target = self.manager.var_ptr(site.context, result);
                self.add_pfg_edge(source, target);
            }
        }
        Ok(true)
    }

    fn finish_stats(&mut self) {
        self.stats.reachable_methods = self.call_graph.reachable_count();
        self.stats.call_edges = self.call_graph.edge_count();
        self.stats.pfg_edges = self.pfg.edge_count();
        self.stats.pointers = self.manager.pointer_count();
        self.stats.contexts = self.manager.context_count();
        self.stats.objects = self.heap.len();
        self.stats.cs_objects = self.manager.cs_obj_count();
    }
}
