//! Call graph
//!
//! Generic over the call-site handle `CS` and the method handle `M`, so
//! the same structure serves the context-sensitive graph built by the
//! points-to solver (`CsCallSiteId` / `CsMethodId`) and plain graphs over
//! `StmtId` / `MethodId`. Nodes and edges are only ever added.

use crate::shared::models::CallKind;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Call edge `caller --kind@call_site--> callee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<CS, M> {
    pub kind: CallKind,
    pub caller: M,
    pub call_site: CS,
    pub callee: M,
}

impl<CS, M> Edge<CS, M> {
    pub fn new(kind: CallKind, caller: M, call_site: CS, callee: M) -> Self {
        Self {
            kind,
            caller,
            call_site,
            callee,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallGraph<CS, M> {
    entry_methods: Vec<M>,
    reachable: FxHashSet<M>,
    /// Reachable methods in discovery order
    reachable_order: Vec<M>,
    edges: Vec<Edge<CS, M>>,
    edge_set: FxHashSet<Edge<CS, M>>,
    out_of_site: FxHashMap<CS, Vec<usize>>,
    out_of_method: FxHashMap<M, Vec<usize>>,
    into_method: FxHashMap<M, Vec<usize>>,
}

impl<CS, M> Default for CallGraph<CS, M> {
    fn default() -> Self {
        Self {
            entry_methods: Vec::new(),
            reachable: FxHashSet::default(),
            reachable_order: Vec::new(),
            edges: Vec::new(),
            edge_set: FxHashSet::default(),
            out_of_site: FxHashMap::default(),
            out_of_method: FxHashMap::default(),
            into_method: FxHashMap::default(),
        }
    }
}

impl<CS, M> CallGraph<CS, M>
where
    CS: Copy + Eq + Hash + Debug,
    M: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    // ── nodes ──────────────────────────────────────────────────────

    pub fn add_entry_method(&mut self, method: M) {
        if !self.entry_methods.contains(&method) {
            self.entry_methods.push(method);
        }
    }

    #[inline]
    pub fn entry_methods(&self) -> &[M] {
        &self.entry_methods
    }

    /// Returns `true` if `method` was not reachable before
    pub fn add_reachable_method(&mut self, method: M) -> bool {
        if self.reachable.insert(method) {
            self.reachable_order.push(method);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_reachable(&self, method: M) -> bool {
        self.reachable.contains(&method)
    }

    /// Reachable methods in discovery order
    pub fn reachable_methods(&self) -> impl Iterator<Item = M> + '_ {
        self.reachable_order.iter().copied()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.reachable_order.len()
    }

    // ── edges ──────────────────────────────────────────────────────

    /// Returns `true` if the edge is new
    pub fn add_edge(&mut self, edge: Edge<CS, M>) -> bool {
        if !self.edge_set.insert(edge) {
            return false;
        }
        let index = self.edges.len();
        self.edges.push(edge);
        self.out_of_site.entry(edge.call_site).or_default().push(index);
        self.out_of_method.entry(edge.caller).or_default().push(index);
        self.into_method.entry(edge.callee).or_default().push(index);
        true
    }

    #[inline]
    pub fn contains_edge(&self, edge: &Edge<CS, M>) -> bool {
        self.edge_set.contains(edge)
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge<CS, M>> + '_ {
        self.edges.iter()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn indexed<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a Edge<CS, M>> + 'a {
        indices
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Edges leaving a call site
    pub fn edges_out_of_site(&self, call_site: CS) -> impl Iterator<Item = &Edge<CS, M>> + '_ {
        self.indexed(self.out_of_site.get(&call_site))
    }

    /// Edges whose caller is `method`
    pub fn edges_out_of(&self, method: M) -> impl Iterator<Item = &Edge<CS, M>> + '_ {
        self.indexed(self.out_of_method.get(&method))
    }

    /// Edges whose callee is `method`
    pub fn edges_into(&self, method: M) -> impl Iterator<Item = &Edge<CS, M>> + '_ {
        self.indexed(self.into_method.get(&method))
    }

    /// Targets of a call site
    pub fn callees_of(&self, call_site: CS) -> impl Iterator<Item = M> + '_ {
        self.edges_out_of_site(call_site).map(|e| e.callee)
    }

    /// Call sites that invoke `method`
    pub fn callers_of(&self, method: M) -> impl Iterator<Item = CS> + '_ {
        self.edges_into(method).map(|e| e.call_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cg = CallGraph<u32, &'static str>;

    #[test]
    fn test_edges_queryable_three_ways() {
        let mut cg = Cg::new();
        cg.add_entry_method("main");
        assert!(cg.add_edge(Edge::new(CallKind::Static, "main", 1, "foo")));
        assert!(cg.add_edge(Edge::new(CallKind::Virtual, "main", 2, "A.m")));
        assert!(cg.add_edge(Edge::new(CallKind::Virtual, "main", 2, "B.m")));
        assert!(cg.add_edge(Edge::new(CallKind::Static, "foo", 3, "A.m")));

        assert_eq!(cg.callees_of(2).collect::<Vec<_>>(), vec!["A.m", "B.m"]);
        assert_eq!(cg.edges_out_of("main").count(), 3);
        assert_eq!(cg.callers_of("A.m").collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(cg.edge_count(), 4);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut cg = Cg::new();
        let edge = Edge::new(CallKind::Special, "main", 1, "A.<init>");
        assert!(cg.add_edge(edge));
        assert!(!cg.add_edge(edge));
        assert!(cg.contains_edge(&edge));
        assert_eq!(cg.edge_count(), 1);
    }

    #[test]
    fn test_reachable_in_discovery_order() {
        let mut cg = Cg::new();
        assert!(cg.add_reachable_method("main"));
        assert!(cg.add_reachable_method("foo"));
        assert!(!cg.add_reachable_method("main"));
        assert_eq!(cg.reachable_methods().collect::<Vec<_>>(), vec!["main", "foo"]);
        assert!(cg.is_reachable("foo"));
        assert!(!cg.is_reachable("bar"));
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_unknown_site_has_no_callees() {
        let cg = Cg::new();
        assert_eq!(cg.callees_of(9).count(), 0);
        assert_eq!(cg.callers_of("nothing").count(), 0);
    }

    #[test]
    fn test_same_callee_different_kinds_are_distinct() {
        let mut cg = Cg::new();
        assert!(cg.add_edge(Edge::new(CallKind::Virtual, "main", 1, "A.m")));
        assert!(cg.add_edge(Edge::new(CallKind::Interface, "main", 1, "A.m")));
        assert_eq!(cg.callees_of(1).count(), 2);
    }
}
