//! Class hierarchy analysis (CHA) call-graph builder
//!
//! Resolves call targets from static types alone: a virtual call may
//! reach every concrete override declared anywhere in the subtype lattice
//! below its receiver type. Cheap and sound, but imprecise compared to
//! the points-to solver.
//!
//! # Algorithm
//! 1. Seed a FIFO worklist with every entry method
//! 2. Pop `m`; skip if already reachable, else mark it
//! 3. Resolve each call site of `m` by kind and add one edge per target
//! 4. Enqueue targets
//!
//! # References
//! - Dean et al. "Optimization of Object-Oriented Programs Using Static
//!   Class Hierarchy Analysis" (ECOOP 1995)

use super::dispatch::{dispatch, resolve_static, unresolved};
use crate::errors::{AnalysisError, Result};
use crate::features::call_graph::domain::{Edge, MethodCallGraph};
use crate::features::call_graph::ports::CallGraphBuilder;
use crate::shared::models::{CallKind, ClassId, InvokeExp, MethodId, Program};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChaBuilder;

impl ChaBuilder {
    pub fn new() -> Self {
        Self
    }

    /// All possible targets of one call site
    pub fn resolve(&self, program: &Program, invoke: &InvokeExp) -> Result<Vec<MethodId>> {
        let method_ref = &invoke.method_ref;
        match invoke.kind {
            CallKind::Static => Ok(vec![resolve_static(program, method_ref)?]),
            CallKind::Special => dispatch(program, method_ref.class, &method_ref.subsignature)
                .map(|m| vec![m])
                .ok_or_else(|| unresolved(program, method_ref.class, &method_ref.subsignature)),
            CallKind::Virtual | CallKind::Interface => {
                Ok(self.resolve_in_subtypes(program, method_ref.class, &method_ref.subsignature))
            }
        }
    }

    /// BFS over the subtype lattice rooted at `root`, visiting each class once
    fn resolve_in_subtypes(
        &self,
        program: &Program,
        root: ClassId,
        subsignature: &str,
    ) -> Vec<MethodId> {
        let hierarchy = program.hierarchy();
        let mut targets = Vec::new();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(root);
        queue.push_back(root);

        while let Some(class) = queue.pop_front() {
            if let Some(target) = dispatch(program, class, subsignature) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            let subtypes = hierarchy
                .direct_subclasses_of(class)
                .iter()
                .chain(hierarchy.direct_subinterfaces_of(class))
                .chain(hierarchy.direct_implementors_of(class));
            for &sub in subtypes {
                if visited.insert(sub) {
                    queue.push_back(sub);
                }
            }
        }
        targets
    }
}

impl CallGraphBuilder for ChaBuilder {
    fn name(&self) -> &'static str {
        "cha"
    }

    fn build(&self, program: &Program) -> Result<MethodCallGraph> {
        if program.entry_methods().is_empty() {
            return Err(AnalysisError::NoEntryMethod);
        }

        let mut call_graph = MethodCallGraph::new();
        let mut queue: VecDeque<MethodId> = VecDeque::new();
        for &entry in program.entry_methods() {
            call_graph.add_entry_method(entry);
            queue.push_back(entry);
        }

        while let Some(method) = queue.pop_front() {
            if !call_graph.add_reachable_method(method) {
                continue;
            }
            debug!("CHA reachable: {}", program.method_signature(method));

            for call_site in program.call_sites_in(method) {
                let Some((_, invoke)) = program.stmt(call_site).as_invoke() else {
                    continue;
                };
                for callee in self.resolve(program, invoke)? {
                    call_graph.add_edge(Edge::new(invoke.kind, method, call_site, callee));
                    if !call_graph.is_reachable(callee) {
                        queue.push_back(callee);
                    }
                }
            }
        }

        info!(
            "CHA call graph: {} reachable methods, {} edges",
            call_graph.reachable_count(),
            call_graph.edge_count()
        );
        Ok(call_graph)
    }
}
